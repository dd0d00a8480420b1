//! Interrupt line registration for the D7S INT1/INT2 outputs.
//!
//! The chip drives two open-drain outputs low while an event is active:
//! INT1 during shutoff/collapse judgment and INT2 while vibration data is
//! being processed. The driver only models registration of a falling-edge
//! handler; wiring the lines into the platform's external-interrupt
//! machinery is the implementor's job. Handlers run in interrupt context
//! and must not perform bus transactions.

/// Falling-edge interrupt registration capability supplied by the platform.
pub trait InterruptLine {
    /// Error type produced by the platform's interrupt machinery.
    type Error;

    /// Binds `handler` to the next falling edges on this line.
    fn attach(&mut self, handler: fn()) -> core::result::Result<(), Self::Error>;

    /// Removes any previously bound handler.
    fn detach(&mut self) -> core::result::Result<(), Self::Error>;
}

/// The pair of D7S interrupt outputs.
pub struct Interrupts<PROC, SHUT> {
    processing: PROC,
    shutoff: SHUT,
}

impl<PROC, SHUT> Interrupts<PROC, SHUT> {
    /// Creates the pair from the platform's two interrupt lines.
    pub const fn new(processing: PROC, shutoff: SHUT) -> Self {
        Self {
            processing,
            shutoff,
        }
    }

    /// Consumes the pair and returns the owned lines.
    pub fn release(self) -> (PROC, SHUT) {
        (self.processing, self.shutoff)
    }
}

impl<PROC, SHUT> Interrupts<PROC, SHUT>
where
    PROC: InterruptLine,
    SHUT: InterruptLine,
{
    /// Binds a handler to the processing (INT2) line.
    pub fn attach_processing(&mut self, handler: fn()) -> core::result::Result<(), PROC::Error> {
        self.processing.attach(handler)
    }

    /// Unbinds the processing (INT2) handler.
    pub fn detach_processing(&mut self) -> core::result::Result<(), PROC::Error> {
        self.processing.detach()
    }

    /// Binds a handler to the shutoff (INT1) line.
    pub fn attach_shutoff(&mut self, handler: fn()) -> core::result::Result<(), SHUT::Error> {
        self.shutoff.attach(handler)
    }

    /// Unbinds the shutoff (INT1) handler.
    pub fn detach_shutoff(&mut self) -> core::result::Result<(), SHUT::Error> {
        self.shutoff.detach()
    }
}
