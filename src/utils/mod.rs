pub mod aggregation;
pub mod format;

pub use aggregation::{bar_fraction, max, max_normalized, mean, normalized_share, sum, Share};
pub use format::{
    format_count, format_currency, format_currency_millions, format_mean, format_percent,
    format_signed_percent,
};
