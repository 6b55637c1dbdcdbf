mod csv;
mod plotters_charts;
mod statistics;

pub use self::csv::{save_breakdown_to_csv, save_scaling_to_csv};
pub use plotters_charts::{create_breakdown_chart, create_scaling_chart, PlottersConfig};
pub use statistics::{print_breakdown_statistics, print_scaling_statistics};
