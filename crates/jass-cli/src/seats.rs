use crate::config::MIN_ITERATIONS;
use std::str::FromStr;
use thiserror::Error;

/// Who sits at one seat of a local table, as written on the command line:
/// `s[:name[:iterations]]` or `r[:name[:host]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatSpec {
    Simulated {
        name: Option<String>,
        iterations: Option<usize>,
    },
    Remote {
        name: Option<String>,
        host: Option<String>,
    },
}

impl SeatSpec {
    pub fn name(&self) -> Option<&str> {
        match self {
            SeatSpec::Simulated { name, .. } | SeatSpec::Remote { name, .. } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatSpecError {
    #[error("empty seat specification")]
    Empty,
    #[error("human seats need the graphical front end, which this binary does not include")]
    Human,
    #[error("unknown seat kind '{0}', expected 's' or 'r'")]
    UnknownKind(String),
    #[error("'{0}' is not a valid iteration count (minimum {min})", min = MIN_ITERATIONS)]
    InvalidIterations(String),
    #[error("too many fields in seat specification '{0}'")]
    TooManyFields(String),
}

impl FromStr for SeatSpec {
    type Err = SeatSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SeatSpecError::Empty);
        }
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() > 3 {
            return Err(SeatSpecError::TooManyFields(s.to_string()));
        }
        let name = optional(fields.get(1));
        let extra = optional(fields.get(2));

        match fields[0] {
            "s" => {
                let iterations = extra
                    .map(|text| {
                        text.parse::<usize>()
                            .ok()
                            .filter(|&n| n >= MIN_ITERATIONS)
                            .ok_or(SeatSpecError::InvalidIterations(text))
                    })
                    .transpose()?;
                Ok(SeatSpec::Simulated { name, iterations })
            }
            "r" => Ok(SeatSpec::Remote { name, host: extra }),
            "h" => Err(SeatSpecError::Human),
            other => Err(SeatSpecError::UnknownKind(other.to_string())),
        }
    }
}

fn optional(field: Option<&&str>) -> Option<String> {
    field.filter(|text| !text.is_empty()).map(|text| text.to_string())
}
