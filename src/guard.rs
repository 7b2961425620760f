//! Presence checks for the inputs of an entry point.
//!
//! Each entry point needs a context, its cases and a test function. The
//! builders in [`table`](crate::table) keep those as optional slots, and before
//! anything else happens every empty slot is reported, not only the first one.

use crate::error::{Error, Mismatch};

/// Report `name` as missing if `slot` is empty.
pub fn missing<T>(slot: &Option<T>, name: &'static str) -> Option<Mismatch> {
    match slot {
        Some(_) => None,
        None => Some(Mismatch::missing(name)),
    }
}

/// Fail with every missing input at once.
pub fn guard<const N: usize>(checks: [Option<Mismatch>; N]) -> Result<(), Error> {
    Error::check(checks.into_iter().flatten())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn present_slots_pass() {
        let t = Some(());
        let args = Some(vec![1]);
        assert!(guard([missing(&t, "t"), missing(&args, "args")]).is_ok());
    }

    #[test]
    fn every_missing_slot_is_reported() {
        let t: Option<()> = None;
        let cfgs = Some(Vec::<i32>::new());
        let f: Option<fn()> = None;

        let err = guard([missing(&t, "t"), missing(&cfgs, "cfgs"), missing(&f, "f")])
            .unwrap_err();
        assert_eq!(
            err.mismatches(),
            [Mismatch::missing("t"), Mismatch::missing("f")]
        );
    }
}
