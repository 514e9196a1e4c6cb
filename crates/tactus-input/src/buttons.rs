//! Button state bitmask.
//!
//! Every logical button owns three bits: one for "held", one for "pressed
//! this frame" and one for "released this frame". The edge bits are cleared
//! together at frame start while the held bits survive.

use std::fmt;

use crate::types::PointerButton;

const DOWN_SHIFT: u8 = PointerButton::COUNT as u8;
const UP_SHIFT: u8 = 2 * PointerButton::COUNT as u8;

bitflags::bitflags! {
    /// Held and edge state for up to five pointer buttons.
    ///
    /// `ANY_HELD`, `ANY_DOWN` and `ANY_UP` are unions of the per-button bits,
    /// not separate storage. Test them with [`PointerButtons::intersects`] or
    /// the `any_*` helpers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u16 {
        const PRIMARY_HELD = 1 << 0;
        const SECONDARY_HELD = 1 << 1;
        const MIDDLE_HELD = 1 << 2;
        const BACK_HELD = 1 << 3;
        const FORWARD_HELD = 1 << 4;

        const PRIMARY_DOWN = 1 << 5;
        const SECONDARY_DOWN = 1 << 6;
        const MIDDLE_DOWN = 1 << 7;
        const BACK_DOWN = 1 << 8;
        const FORWARD_DOWN = 1 << 9;

        const PRIMARY_UP = 1 << 10;
        const SECONDARY_UP = 1 << 11;
        const MIDDLE_UP = 1 << 12;
        const BACK_UP = 1 << 13;
        const FORWARD_UP = 1 << 14;

        const ANY_HELD = Self::PRIMARY_HELD.bits()
            | Self::SECONDARY_HELD.bits()
            | Self::MIDDLE_HELD.bits()
            | Self::BACK_HELD.bits()
            | Self::FORWARD_HELD.bits();
        const ANY_DOWN = Self::PRIMARY_DOWN.bits()
            | Self::SECONDARY_DOWN.bits()
            | Self::MIDDLE_DOWN.bits()
            | Self::BACK_DOWN.bits()
            | Self::FORWARD_DOWN.bits();
        const ANY_UP = Self::PRIMARY_UP.bits()
            | Self::SECONDARY_UP.bits()
            | Self::MIDDLE_UP.bits()
            | Self::BACK_UP.bits()
            | Self::FORWARD_UP.bits();
    }
}

impl PointerButtons {
    #[inline]
    pub fn held_bit(button: PointerButton) -> Self {
        Self::from_bits_retain(1 << button.index())
    }

    #[inline]
    pub fn down_bit(button: PointerButton) -> Self {
        Self::from_bits_retain(1 << (DOWN_SHIFT + button.index()))
    }

    #[inline]
    pub fn up_bit(button: PointerButton) -> Self {
        Self::from_bits_retain(1 << (UP_SHIFT + button.index()))
    }

    /// Marks `button` as held and pressed this frame.
    ///
    /// Pressing a button that is already held leaves the state untouched.
    pub fn press(&mut self, button: PointerButton) {
        let held = Self::held_bit(button);
        if self.contains(held) {
            return;
        }
        self.insert(held | Self::down_bit(button));
    }

    /// Clears the held bit of `button` and marks it released this frame.
    ///
    /// Releasing a button that is not held has no effect.
    pub fn release(&mut self, button: PointerButton) {
        let held = Self::held_bit(button);
        if !self.contains(held) {
            return;
        }
        self.remove(held);
        self.insert(Self::up_bit(button));
    }

    /// Drops every pressed/released edge in one step; held bits stay.
    pub fn clear_edges(&mut self) {
        self.remove(Self::ANY_DOWN | Self::ANY_UP);
    }

    pub fn is_held(&self, button: PointerButton) -> bool {
        self.contains(Self::held_bit(button))
    }

    pub fn was_pressed(&self, button: PointerButton) -> bool {
        self.contains(Self::down_bit(button))
    }

    pub fn was_released(&self, button: PointerButton) -> bool {
        self.contains(Self::up_bit(button))
    }

    pub fn any_held(&self) -> bool {
        self.intersects(Self::ANY_HELD)
    }

    pub fn any_down(&self) -> bool {
        self.intersects(Self::ANY_DOWN)
    }

    pub fn any_up(&self) -> bool {
        self.intersects(Self::ANY_UP)
    }

    pub fn held(self) -> impl Iterator<Item = PointerButton> {
        PointerButton::ALL
            .into_iter()
            .filter(move |button| self.is_held(*button))
    }

    pub fn pressed(self) -> impl Iterator<Item = PointerButton> {
        PointerButton::ALL
            .into_iter()
            .filter(move |button| self.was_pressed(*button))
    }

    pub fn released(self) -> impl Iterator<Item = PointerButton> {
        PointerButton::ALL
            .into_iter()
            .filter(move |button| self.was_released(*button))
    }
}

impl fmt::Display for PointerButtons {
    /// Lists the held buttons, e.g. `[Primary, Middle]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, button) in self.held().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(button.name())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_button_bits_line_up_with_named_flags() {
        assert_eq!(
            PointerButtons::held_bit(PointerButton::Primary),
            PointerButtons::PRIMARY_HELD
        );
        assert_eq!(
            PointerButtons::down_bit(PointerButton::Middle),
            PointerButtons::MIDDLE_DOWN
        );
        assert_eq!(
            PointerButtons::up_bit(PointerButton::Forward),
            PointerButtons::FORWARD_UP
        );
    }

    #[test]
    fn press_sets_held_and_down() {
        let mut buttons = PointerButtons::empty();
        buttons.press(PointerButton::Secondary);

        assert!(buttons.is_held(PointerButton::Secondary));
        assert!(buttons.was_pressed(PointerButton::Secondary));
        assert!(!buttons.was_released(PointerButton::Secondary));
        assert!(buttons.any_held());
        assert!(buttons.any_down());
        assert!(!buttons.any_up());
    }

    #[test]
    fn repeated_press_does_not_emit_a_new_edge() {
        let mut buttons = PointerButtons::empty();
        buttons.press(PointerButton::Primary);
        buttons.clear_edges();
        buttons.press(PointerButton::Primary);

        assert!(buttons.is_held(PointerButton::Primary));
        assert!(!buttons.was_pressed(PointerButton::Primary));
    }

    #[test]
    fn release_of_unheld_button_is_ignored() {
        let mut buttons = PointerButtons::empty();
        buttons.release(PointerButton::Back);
        assert!(buttons.is_empty());
    }

    #[test]
    fn press_and_release_in_one_frame_keeps_both_edges() {
        let mut buttons = PointerButtons::empty();
        buttons.press(PointerButton::Primary);
        buttons.release(PointerButton::Primary);

        assert!(!buttons.is_held(PointerButton::Primary));
        assert!(buttons.was_pressed(PointerButton::Primary));
        assert!(buttons.was_released(PointerButton::Primary));
    }

    #[test]
    fn clear_edges_preserves_held_bits() {
        let mut buttons = PointerButtons::empty();
        for button in PointerButton::ALL {
            buttons.press(button);
        }
        buttons.release(PointerButton::Middle);
        let held_before = buttons & PointerButtons::ANY_HELD;

        buttons.clear_edges();

        assert_eq!(buttons & PointerButtons::ANY_HELD, held_before);
        assert!(!buttons.any_down());
        assert!(!buttons.any_up());
    }

    #[test]
    fn aggregates_match_union_of_constituents() {
        let mut buttons = PointerButtons::empty();
        buttons.press(PointerButton::Back);
        buttons.press(PointerButton::Primary);
        buttons.release(PointerButton::Primary);

        let held_union = PointerButton::ALL
            .iter()
            .any(|button| buttons.is_held(*button));
        let down_union = PointerButton::ALL
            .iter()
            .any(|button| buttons.was_pressed(*button));
        let up_union = PointerButton::ALL
            .iter()
            .any(|button| buttons.was_released(*button));

        assert_eq!(buttons.any_held(), held_union);
        assert_eq!(buttons.any_down(), down_union);
        assert_eq!(buttons.any_up(), up_union);
    }

    #[test]
    fn display_lists_held_buttons() {
        let mut buttons = PointerButtons::empty();
        assert_eq!(buttons.to_string(), "[]");

        buttons.press(PointerButton::Middle);
        buttons.press(PointerButton::Primary);
        assert_eq!(buttons.to_string(), "[Primary, Middle]");
    }
}
