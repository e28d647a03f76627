// Is there a card in the slot?

/// The card detect switch.
///
/// Implementations do their own debouncing, the drives just ask once per poll and
/// believe whatever comes back.
pub trait PresenceSensor {
    fn card_present(&mut self) -> bool;
}

/// For boards with no card detect switch. The card is always there.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysPresent;

impl PresenceSensor for AlwaysPresent {
    fn card_present(&mut self) -> bool {
        true
    }
}

// Closures work too, which is mostly useful for tests.
impl<F> PresenceSensor for F
where
    F: FnMut() -> bool,
{
    fn card_present(&mut self) -> bool {
        self()
    }
}
