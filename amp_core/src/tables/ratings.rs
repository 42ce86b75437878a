//! Standard Equipment Ratings
//!
//! Discrete rating steps used for ceiling selection. All tables are sorted
//! ascending.

use super::StandardTable;

/// Miniature/moulded-case circuit breaker ratings (A)
pub const BREAKERS_A: StandardTable = StandardTable::new(
    "breaker",
    "A",
    &[
        6.0, 10.0, 13.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0,
        200.0, 250.0, 315.0, 400.0, 500.0, 630.0,
    ],
);

/// Contactor AC-3 ratings (A)
pub const CONTACTORS_A: StandardTable = StandardTable::new(
    "contactor",
    "A",
    &[
        9.0, 12.0, 18.0, 25.0, 32.0, 38.0, 40.0, 50.0, 65.0, 80.0, 95.0, 115.0, 150.0, 185.0,
        225.0, 265.0, 330.0, 400.0, 500.0, 630.0, 780.0,
    ],
);

/// Distribution transformer ratings (kVA)
pub const TRANSFORMER_KVA: StandardTable = StandardTable::new(
    "transformer",
    "kVA",
    &[
        25.0, 50.0, 63.0, 100.0, 160.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0,
        1600.0, 2000.0, 2500.0, 3150.0,
    ],
);

/// Standby diesel generator ratings (kVA)
pub const GENERATOR_KVA: StandardTable = StandardTable::new(
    "generator",
    "kVA",
    &[
        20.0, 30.0, 45.0, 60.0, 80.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0,
        500.0, 600.0, 750.0, 800.0, 1000.0, 1250.0, 1500.0, 2000.0, 2500.0, 3000.0,
    ],
);

/// Low-voltage capacitor bank steps (kVAr)
pub const CAPACITOR_KVAR: StandardTable = StandardTable::new(
    "capacitor bank",
    "kVAr",
    &[
        5.0, 10.0, 12.5, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 75.0, 100.0, 125.0, 150.0,
        200.0, 250.0, 300.0, 400.0, 500.0, 600.0, 800.0, 1000.0,
    ],
);

/// Every rating table, for listing and consistency checks
pub const ALL: [StandardTable; 5] = [
    BREAKERS_A,
    CONTACTORS_A,
    TRANSFORMER_KVA,
    GENERATOR_KVA,
    CAPACITOR_KVAR,
];
