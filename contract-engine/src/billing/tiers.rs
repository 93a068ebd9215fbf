//! Overtime schedule for Percentage-method contracts
//!
//! The first 160 hours are paid at par, every band after that escalates.
//! Band widths are absolute hours and do not move with a contract's
//! configured `standard_hours`.

use rust_decimal::Decimal;

/// One band of the overtime schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvertimeTier {
    pub label: &'static str,
    /// Hours covered by the band; `None` is unbounded
    pub width: Option<Decimal>,
    pub multiplier: Decimal,
}

const fn hours(value: u32) -> Option<Decimal> {
    Some(Decimal::from_parts(value, 0, 0, false, 0))
}

/// Multiplier expressed in hundredths (125 => 1.25)
const fn multiplier(hundredths: u32) -> Decimal {
    Decimal::from_parts(hundredths, 0, 0, false, 2)
}

pub const OVERTIME_SCHEDULE: [OvertimeTier; 7] = [
    OvertimeTier {
        label: "0-160h",
        width: hours(160),
        multiplier: multiplier(100),
    },
    OvertimeTier {
        label: "161-180h",
        width: hours(20),
        multiplier: multiplier(100),
    },
    OvertimeTier {
        label: "181-200h",
        width: hours(20),
        multiplier: multiplier(125),
    },
    OvertimeTier {
        label: "201-220h",
        width: hours(20),
        multiplier: multiplier(150),
    },
    OvertimeTier {
        label: "221-240h",
        width: hours(20),
        multiplier: multiplier(150),
    },
    OvertimeTier {
        label: "241-260h",
        width: hours(20),
        multiplier: multiplier(175),
    },
    OvertimeTier {
        label: "261h+",
        width: None,
        multiplier: multiplier(200),
    },
];
