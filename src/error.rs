use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart surface is not created; call `create` first")]
    NotCreated,

    #[error("chart surface is already created")]
    AlreadyCreated,

    #[error("chart data is not set; call `set_data` before rendering")]
    MissingData,

    #[error("row index {index} is out of bounds for {len} entity rows")]
    InvalidRow { index: usize, len: usize },
}
