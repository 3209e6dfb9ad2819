//! Clock tree for the STM32H753.

use embassy_stm32::{rcc::*, Config, Peripherals};

/// Bring up the core at 400 MHz from the internal oscillator.
///
/// - PLL1 = HSI (64 MHz) / 4 * 50 / 2 = 400 MHz system clock
/// - 200 MHz AHB, 100 MHz on every APB
///
/// I2C1 takes its kernel clock from APB1, so the bus timing is derived from 100 MHz.
pub fn init_system() -> Peripherals {
    let mut config = Config::default();

    config.rcc.hsi = Some(HSIPrescaler::DIV1);
    config.rcc.csi = true;

    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2),
        divq: None,
        divr: None,
    });

    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV2;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV2;
    config.rcc.apb3_pre = APBPrescaler::DIV2;
    config.rcc.apb4_pre = APBPrescaler::DIV2;
    config.rcc.voltage_scale = VoltageScale::Scale1;

    embassy_stm32::init(config)
}
