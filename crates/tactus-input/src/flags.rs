use std::fmt;

bitflags::bitflags! {
    /// Provenance and visibility markers of a pointer record.
    ///
    /// Independent of the button state. The owner sets and clears them; only
    /// a full reset drops them implicitly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerFlags: u8 {
        /// Generated by script or test code rather than a real device.
        const ARTIFICIAL = 1 << 0;
        /// Was cancelled earlier and has been reinstated.
        const RETURNED = 1 << 1;
        /// Not meant to be surfaced to user-facing UI.
        const INTERNAL = 1 << 2;
    }
}

impl fmt::Display for PointerFlags {
    /// Fixed-width binary rendering, e.g. `00000101`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_fixed_width_binary() {
        assert_eq!(PointerFlags::empty().to_string(), "00000000");
        assert_eq!(
            (PointerFlags::ARTIFICIAL | PointerFlags::INTERNAL).to_string(),
            "00000101"
        );
    }
}
