/*!
 * Trend Module
 * EMA trend estimation, leak/spike detection, and the bounded alert log
 */

mod alerts;
mod analyze;

pub use alerts::{AlertKind, AlertLog, AlertRecord};
pub use analyze::observe;
