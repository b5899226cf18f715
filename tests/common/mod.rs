//! Host stand-ins for GPIO pins.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Pin levels shared by a bank of [`FakeOutput`]s.
///
/// Also remembers the most lines that were ever active at once, so tests can catch two cells
/// lit together even for one write.
#[derive(Debug)]
pub struct PinBank {
    high: Vec<bool>,
    active_high: bool,
    peak_active: usize,
}

impl PinBank {
    pub fn new(len: usize, active_high: bool) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            high: vec![!active_high; len],
            active_high,
            peak_active: 0,
        }))
    }

    pub fn levels(&self) -> &[bool] {
        &self.high
    }

    pub fn active(&self) -> Vec<usize> {
        (0..self.high.len())
            .filter(|&index| self.high[index] == self.active_high)
            .collect()
    }

    pub fn peak_active(&self) -> usize {
        self.peak_active
    }

    /// Bit `i` set when line `i` is active.
    pub fn active_bits(&self) -> u8 {
        self.active()
            .into_iter()
            .fold(0, |bits, index| bits | (1 << index))
    }

    fn set(&mut self, index: usize, high: bool) {
        self.high[index] = high;
        self.peak_active = self.peak_active.max(self.active().len());
    }
}

#[derive(Debug)]
pub struct FakeOutput {
    bank: Rc<RefCell<PinBank>>,
    index: usize,
}

impl ErrorType for FakeOutput {
    type Error = Infallible;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.bank.borrow_mut().set(self.index, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.bank.borrow_mut().set(self.index, true);
        Ok(())
    }
}

/// One [`FakeOutput`] per line of `bank`.
pub fn outputs<const N: usize>(bank: &Rc<RefCell<PinBank>>) -> [FakeOutput; N] {
    core::array::from_fn(|index| FakeOutput {
        bank: Rc::clone(bank),
        index,
    })
}

/// An input whose level the test sets.
#[derive(Debug, Clone, Default)]
pub struct FakeInput(Rc<RefCell<bool>>);

impl FakeInput {
    pub fn set_high(&self, high: bool) {
        *self.0.borrow_mut() = high;
    }
}

impl ErrorType for FakeInput {
    type Error = Infallible;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(*self.0.borrow())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!*self.0.borrow())
    }
}
