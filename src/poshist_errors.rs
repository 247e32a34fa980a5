use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoshistError {
    #[error(
        "Batch size mismatch: {positions} positions cannot be paired with {quaternions} quaternions \
         (sizes must be equal when both are greater than one)"
    )]
    BatchSizeMismatch {
        positions: usize,
        quaternions: usize,
    },

    #[error("Azimuth and zenith batches differ in size: {azimuths} azimuths, {zeniths} zeniths")]
    AngleBatchMismatch { azimuths: usize, zeniths: usize },

    #[error("Unknown detector: {0}")]
    UnknownDetector(String),

    #[error("A quaternion needs exactly 4 components, got {0}")]
    InvalidQuaternionLength(usize),

    #[error("Invalid sample size for decimation: {0}")]
    InvalidSampleSize(usize),

    #[error("At least two bin edges are needed to build a count rate, got {0}")]
    InvalidBinCount(usize),

    #[error("No event time to bin")]
    EmptyEventList,

    #[error("Event times span a zero-length interval")]
    DegenerateTimeSpan,

    #[error("Error while reading the attitude table: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for PoshistError {
    fn eq(&self, other: &Self) -> bool {
        use PoshistError::*;
        match (self, other) {
            (
                BatchSizeMismatch {
                    positions: p1,
                    quaternions: q1,
                },
                BatchSizeMismatch {
                    positions: p2,
                    quaternions: q2,
                },
            ) => p1 == p2 && q1 == q2,
            (
                AngleBatchMismatch {
                    azimuths: a1,
                    zeniths: z1,
                },
                AngleBatchMismatch {
                    azimuths: a2,
                    zeniths: z2,
                },
            ) => a1 == a2 && z1 == z2,
            (UnknownDetector(a), UnknownDetector(b)) => a == b,
            (InvalidQuaternionLength(a), InvalidQuaternionLength(b)) => a == b,
            (InvalidSampleSize(a), InvalidSampleSize(b)) => a == b,
            (InvalidBinCount(a), InvalidBinCount(b)) => a == b,

            // csv errors are not comparable: equal if same variant
            (CsvError(_), CsvError(_)) => true,

            (EmptyEventList, EmptyEventList) => true,
            (DegenerateTimeSpan, DegenerateTimeSpan) => true,

            _ => false,
        }
    }
}
