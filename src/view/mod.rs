//! View models derived from the data layer. Nothing here touches egui, so
//! the plot and table contracts can be exercised without a window.

pub mod scatter;
pub mod table;
