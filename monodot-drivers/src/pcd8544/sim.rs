//! Simulated panel bus for host tests
//!
//! Every line shares one recorder. SCLK rising edges while SCE is low shift
//! DIN into a byte; the eighth bit completes a frame tagged with the D/C
//! level at that moment. Protocol violations are counted rather than
//! panicking so tests can assert on them.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use monodot_hal::OutputPin;

use super::PanelPins;

/// Control lines of the panel bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Sce,
    Rst,
    Dc,
    Din,
    Sclk,
}

/// One byte seen on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// D/C was high (data) when the byte completed
    pub data: bool,
    pub byte: u8,
}

#[derive(Debug, Default)]
pub struct BusState {
    levels: [bool; 5],
    shift: u8,
    bits: u8,
    pub frames: Vec<Frame>,
    /// Completed reset pulses (RST low then high)
    pub resets: u32,
    /// D/C transitions while SCE was asserted
    pub dc_changes_while_selected: u32,
    /// SCE released with a partial byte shifted in
    pub partial_frames: u32,
    /// SCLK rising edges while SCE was released
    pub stray_clocks: u32,
}

impl BusState {
    pub fn level(&self, line: Line) -> bool {
        self.levels[line as usize]
    }

    fn set(&mut self, line: Line, high: bool) {
        let was_high = self.levels[line as usize];
        self.levels[line as usize] = high;
        if was_high == high {
            return;
        }

        match line {
            Line::Sce => {
                if high && self.bits != 0 {
                    self.partial_frames += 1;
                }
                self.shift = 0;
                self.bits = 0;
            }
            Line::Rst => {
                if high {
                    self.resets += 1;
                }
            }
            Line::Dc => {
                if !self.level(Line::Sce) {
                    self.dc_changes_while_selected += 1;
                }
            }
            Line::Sclk => {
                if !high {
                    return;
                }
                if self.level(Line::Sce) {
                    self.stray_clocks += 1;
                    return;
                }
                self.shift = (self.shift << 1) | self.level(Line::Din) as u8;
                self.bits += 1;
                if self.bits == 8 {
                    self.frames.push(Frame {
                        data: self.level(Line::Dc),
                        byte: self.shift,
                    });
                    self.shift = 0;
                    self.bits = 0;
                }
            }
            Line::Din => {}
        }
    }

    /// Bytes sent with D/C low
    pub fn commands(&self) -> Vec<u8> {
        self.frames.iter().filter(|f| !f.data).map(|f| f.byte).collect()
    }

    /// Bytes sent with D/C high
    pub fn data(&self) -> Vec<u8> {
        self.frames.iter().filter(|f| f.data).map(|f| f.byte).collect()
    }

    /// Forget everything recorded so far, keeping line levels
    pub fn clear_log(&mut self) {
        self.frames.clear();
        self.resets = 0;
        self.dc_changes_while_selected = 0;
        self.partial_frames = 0;
        self.stray_clocks = 0;
    }
}

pub type SharedBus = Rc<RefCell<BusState>>;

/// Output line wired to the shared recorder
pub struct SimLine {
    bus: SharedBus,
    line: Line,
}

impl OutputPin for SimLine {
    fn set_high(&mut self) {
        self.bus.borrow_mut().set(self.line, true);
    }

    fn set_low(&mut self) {
        self.bus.borrow_mut().set(self.line, false);
    }

    fn is_set_high(&self) -> bool {
        self.bus.borrow().level(self.line)
    }
}

pub fn new_bus() -> SharedBus {
    Rc::new(RefCell::new(BusState::default()))
}

pub fn line(bus: &SharedBus, line: Line) -> SimLine {
    SimLine {
        bus: Rc::clone(bus),
        line,
    }
}

pub type SimPins = PanelPins<SimLine, SimLine, SimLine, SimLine, SimLine>;

pub fn pins(bus: &SharedBus) -> SimPins {
    PanelPins {
        sce: line(bus, Line::Sce),
        rst: line(bus, Line::Rst),
        dc: line(bus, Line::Dc),
        din: line(bus, Line::Din),
        sclk: line(bus, Line::Sclk),
    }
}
