/// UI layer: side/top panels (legend, animated total, top-10 list) and the
/// ranking scatter plot.

pub mod panels;
pub mod plot;
