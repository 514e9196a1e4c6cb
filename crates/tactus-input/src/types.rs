use std::fmt;

/// Identity of an active pointer.
///
/// Ids are handed out by the pool when a contact begins and stay fixed until
/// the record is reset. Unbound records carry [`PointerId::INVALID`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i32);

impl PointerId {
    pub const INVALID: PointerId = PointerId(-1);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for PointerId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("invalid")
        }
    }
}

/// Opaque handle of the input source that owns a pointer record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputSourceId(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    #[default]
    Unknown,
    Touch,
    Mouse,
    Pen,
    /// A tracked physical object (fiducial marker, tangible) rather than a finger or tool.
    Object,
}

impl PointerKind {
    pub fn name(self) -> &'static str {
        match self {
            PointerKind::Unknown => "Unknown",
            PointerKind::Touch => "Touch",
            PointerKind::Mouse => "Mouse",
            PointerKind::Pen => "Pen",
            PointerKind::Object => "Object",
        }
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

impl PointerButton {
    /// Number of logical buttons a pointer tracks.
    pub const COUNT: usize = 5;

    pub const ALL: [PointerButton; Self::COUNT] = [
        PointerButton::Primary,
        PointerButton::Secondary,
        PointerButton::Middle,
        PointerButton::Back,
        PointerButton::Forward,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PointerButton::Primary => "Primary",
            PointerButton::Secondary => "Secondary",
            PointerButton::Middle => "Middle",
            PointerButton::Back => "Back",
            PointerButton::Forward => "Forward",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_is_default() {
        assert_eq!(PointerId::default(), PointerId::INVALID);
        assert!(!PointerId::INVALID.is_valid());
        assert!(PointerId(0).is_valid());
    }

    #[test]
    fn id_display() {
        assert_eq!(PointerId(7).to_string(), "7");
        assert_eq!(PointerId::INVALID.to_string(), "invalid");
    }

    #[test]
    fn button_indices_are_dense() {
        for (i, button) in PointerButton::ALL.iter().enumerate() {
            assert_eq!(button.index() as usize, i);
        }
    }
}
