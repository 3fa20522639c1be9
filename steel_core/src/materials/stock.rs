//! Plate Stock Thicknesses
//!
//! Base-plate design rounds a required thickness up to an available stock
//! plate. The stock list is an injected, read-only collaborator: callers pass
//! a `&dyn StockThicknessProvider` (typically held in an `Arc` and shared
//! across threads) instead of relying on a global.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::stock::{StandardPlateStock, StockThicknessProvider};
//! use steel_core::units::UnitSystem;
//!
//! let stock = StandardPlateStock;
//! assert_eq!(stock.select_thickness_mm(13.2, UnitSystem::Metric).unwrap(), 15.0);
//! // 5/8" plate reported in mm
//! assert!((stock.select_thickness_mm(13.2, UnitSystem::Imperial).unwrap() - 15.875).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::units::UnitSystem;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

const METRIC_PLATES_MM: [f64; 25] = [
    3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 15.0, 16.0, 20.0, 25.0, 30.0, 32.0, 35.0, 40.0, 45.0, 50.0, 55.0,
    60.0, 65.0, 70.0, 75.0, 80.0, 90.0, 100.0,
];

const IMPERIAL_PLATES_IN: [f64; 15] = [
    0.1875, 0.25, 0.3125, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0,
];

/// Source of available plate thicknesses.
pub trait StockThicknessProvider: Send + Sync {
    /// Ascending thicknesses in the system's length unit (mm or in).
    fn thicknesses(&self, system: UnitSystem) -> &[f64];

    /// Smallest stock thickness ≥ `required_mm`, returned in mm.
    ///
    /// Imperial stock is compared in inches. There is no fallback to the
    /// thickest plate: an insufficient list is `NotFound`.
    fn select_thickness_mm(&self, required_mm: f64, system: UnitSystem) -> CalcResult<f64> {
        let (required, to_mm) = match system {
            UnitSystem::Metric => (required_mm, 1.0),
            UnitSystem::Imperial => (required_mm / MM_PER_INCH, MM_PER_INCH),
        };
        self.thicknesses(system)
            .iter()
            .find(|&&t| t >= required)
            .map(|t| t * to_mm)
            .ok_or_else(|| {
                CalcError::not_found(
                    "Stock plate thickness",
                    format!(">= {:.2} mm ({:?})", required_mm, system),
                )
            })
    }
}

/// Common mill plate thicknesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPlateStock;

impl StockThicknessProvider for StandardPlateStock {
    fn thicknesses(&self, system: UnitSystem) -> &[f64] {
        match system {
            UnitSystem::Metric => &METRIC_PLATES_MM,
            UnitSystem::Imperial => &IMPERIAL_PLATES_IN,
        }
    }
}

/// Shop- or supplier-specific stock list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateStock {
    metric_mm: Vec<f64>,
    imperial_in: Vec<f64>,
}

impl PlateStock {
    /// Lists are sorted ascending and deduplicated; values must be positive.
    pub fn new(mut metric_mm: Vec<f64>, mut imperial_in: Vec<f64>) -> CalcResult<Self> {
        for t in metric_mm.iter().chain(imperial_in.iter()) {
            require_positive("stock_thickness", *t, "Stock thicknesses must be positive")?;
        }
        for list in [&mut metric_mm, &mut imperial_in] {
            list.sort_by(f64::total_cmp);
            list.dedup();
        }
        Ok(Self { metric_mm, imperial_in })
    }
}

impl StockThicknessProvider for PlateStock {
    fn thicknesses(&self, system: UnitSystem) -> &[f64] {
        match system {
            UnitSystem::Metric => &self.metric_mm,
            UnitSystem::Imperial => &self.imperial_in,
        }
    }
}
