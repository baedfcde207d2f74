/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Absolute tolerance (in the position's currency) for the split value check
pub const DEFAULT_VALUE_TOLERANCE: &str = "0.01";

/// Setting keys read by the settings service
pub const SETTING_SPLIT_VALUE_TOLERANCE: &str = "split_value_tolerance";
pub const SETTING_SPLIT_TOLERANCE_MODE: &str = "split_tolerance_mode";
pub const SETTING_SPLIT_DISPLAY_PRECISION: &str = "split_display_precision";
