//! Hamburger menu open/closed state.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuInput {
    ToggleClicked,
    Escape,
    /// A click that landed outside both the nav and its toggle button.
    OutsideClick { viewport_width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Apply an input and return the resulting open state.
    ///
    /// Outside clicks only close the menu when the viewport is at or below `breakpoint`.
    pub fn apply(&mut self, input: MenuInput, breakpoint: f64) -> bool {
        self.open = match input {
            MenuInput::ToggleClicked => !self.open,
            MenuInput::Escape => false,
            MenuInput::OutsideClick { viewport_width } if viewport_width <= breakpoint => false,
            MenuInput::OutsideClick { .. } => self.open,
        };
        self.open
    }

    #[must_use]
    pub const fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
