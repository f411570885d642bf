use super::InputSource;

/// Plain keyboard controls; uses the trait's keyboard rules unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Keyboard;

impl InputSource for Keyboard {
    fn name(&self) -> &'static str {
        "keyboard"
    }
}
