#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid region: ({xmin}, {ymin}) .. ({xmax}, {ymax}) must have xmin < xmax and ymin < ymax")]
    InvalidRegion {
        xmin: f32,
        ymin: f32,
        xmax: f32,
        ymax: f32,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Cannot normalize a zero-length vector")]
    DegenerateGeometry,
    #[error("Population is empty")]
    EmptyPopulation,
    #[error("No reproduction events recorded yet")]
    NoReproductions,
}

pub type Result<T> = std::result::Result<T, SimError>;
