//! Monodot - PCD8544 demo firmware
//!
//! Wires a Nokia 5110 panel, a push button and a backlight line to an
//! RP2040 and runs a small poll loop on top of the Monodot drivers:
//!
//! - short press: count it and light the backlight for a few seconds
//! - long press: flip the panel between normal and inverse video
//!
//! Default wiring (Pico):
//!
//! | Signal    | Pin    |
//! |-----------|--------|
//! | SCE       | GPIO17 |
//! | RST       | GPIO20 |
//! | D/C       | GPIO16 |
//! | DIN       | GPIO19 |
//! | SCLK      | GPIO18 |
//! | Button    | GPIO15 |
//! | Backlight | GPIO21 |

#![no_std]
#![no_main]

use core::fmt::{self, Write as _};

use defmt::{debug, error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Instant, Timer};
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use monodot_core::config::{parse_config, DeviceConfig};
use monodot_core::traits::{Press, PowerSwitch, PushButton, TextDisplay, TextDisplayExt};
use monodot_drivers::{Button, PanelPins, Pcd8544, PowerLine};
use monodot_hal::{Clock, EhInput, EhOutput, Millis};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Button and timer poll interval
const POLL_INTERVAL_MS: u64 = 10;

/// How long a short press keeps the backlight on
const BACKLIGHT_TIMEOUT_MS: u32 = 5_000;

/// Millisecond uptime from the embassy time driver
#[derive(Clone, Copy)]
struct Uptime;

impl Clock for Uptime {
    fn now_ms(&self) -> Millis {
        // Truncation wraps every ~49 days; drivers compare with wrapping math
        Instant::now().as_millis() as Millis
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Monodot firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Panel lines start at their idle levels; the driver drives them again
    let pins = PanelPins {
        sce: EhOutput::new(Output::new(p.PIN_17, Level::High), true),
        rst: EhOutput::new(Output::new(p.PIN_20, Level::High), true),
        dc: EhOutput::new(Output::new(p.PIN_16, Level::High), true),
        din: EhOutput::new(Output::new(p.PIN_19, Level::Low), false),
        sclk: EhOutput::new(Output::new(p.PIN_18, Level::Low), false),
    };
    let mut lcd = Pcd8544::new(pins, Delay, config.panel, config.timing);
    info!("Display initialized");

    let pull = if config.button.active_low {
        Pull::Up
    } else {
        Pull::Down
    };
    let mut button = Button::new(
        EhInput::new(Input::new(p.PIN_15, pull)),
        Uptime,
        &config.button,
    );

    let backlight_pin = EhOutput::new(Output::new(p.PIN_21, Level::Low), false);
    let mut backlight = PowerLine::new(backlight_pin, Uptime, &config.power);

    let mut presses: u32 = 0;
    let mut inverse = config.panel.inverse;
    let mut shown_secs = u32::MAX;

    draw_banner(&mut lcd);
    draw_status(&mut lcd, presses, backlight.is_on());

    info!("Running");

    loop {
        match button.poll_configured() {
            Press::Short => {
                presses = presses.wrapping_add(1);
                backlight.on(Some(BACKLIGHT_TIMEOUT_MS));
                draw_status(&mut lcd, presses, backlight.is_on());
            }
            Press::Long => {
                inverse = !inverse;
                lcd.set_inverted(inverse);
                debug!("Inverse video: {}", inverse);
            }
            Press::None => {}
        }

        if backlight.check() {
            draw_status(&mut lcd, presses, backlight.is_on());
        }

        let secs = Uptime.now_ms() / 1000;
        if secs != shown_secs {
            shown_secs = secs;
            draw_uptime(&mut lcd, secs);
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

/// Parse the embedded device.toml, falling back to defaults
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            DeviceConfig::default()
        }
    }
}

fn draw_banner<D: TextDisplay>(lcd: &mut D) {
    show(lcd.print_line(0, "Monodot"));
    show(lcd.print_line(1, "--------------"));
}

fn draw_status<D: TextDisplay>(lcd: &mut D, presses: u32, light: bool) {
    let line = format_line(format_args!("Presses {}", presses));
    show(lcd.print_line(2, &line));

    let line = format_line(format_args!("Light {}", if light { "on" } else { "off" }));
    show(lcd.print_line(3, &line));
}

fn draw_uptime<D: TextDisplay>(lcd: &mut D, secs: u32) {
    let line = format_line(format_args!("Up {}:{:02}", secs / 60, secs % 60));
    show(lcd.print_line(5, &line));
}

/// Format one display row; overflow keeps what fit and is logged
fn format_line(args: fmt::Arguments) -> String<24> {
    let mut line = String::new();
    if line.write_fmt(args).is_err() {
        warn!("Display line truncated: {=str}", line.as_str());
    }
    line
}

/// Log a failed draw; the loop keeps running
fn show(result: Result<(), monodot_core::traits::DisplayError>) {
    if let Err(e) = result {
        warn!("Display error: {:?}", e);
    }
}
