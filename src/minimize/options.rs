use regex::Regex;
use simple_error::{bail, SimpleError};
use std::{fmt, str::FromStr, sync::OnceLock};

const TRACE_BIT: u8 = 0b001;
const TRACK_BEST_VERTEX_BIT: u8 = 0b010;
const RECORD_HISTORY_BIT: u8 = 0b100;

/// Side effects requested for a single optimization run.
///
/// None of the options change the numerical trajectory: they only control
/// what gets printed while iterating and whether a snapshot of the simplex is
/// kept after every iteration.
///
/// The options also round-trip through the compact bit encoding
/// (`0b001` trace, `0b010` track best vertex, `0b100` record history).
///
/// ```
/// use nmsimplex::minimize::OutputFlags;
///
/// let flags: OutputFlags = "trace|record_history".parse().unwrap();
/// assert_eq!(flags.bits(), 0b101);
/// assert_eq!(flags, OutputFlags::from_bits(5).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFlags {
    /// Print iteration, evaluation count, best value and stopping criterion
    pub trace: bool,
    /// Also print the coordinates of the best vertex; only honored with `trace`
    pub track_best_vertex: bool,
    /// Append a snapshot of the simplex to the history after every iteration
    pub record_history: bool,
}

impl OutputFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, val: bool) -> Self {
        self.trace = val;
        self
    }

    pub fn with_track_best_vertex(mut self, val: bool) -> Self {
        self.track_best_vertex = val;
        self
    }

    pub fn with_record_history(mut self, val: bool) -> Self {
        self.record_history = val;
        self
    }

    pub fn from_bits(bits: u8) -> Result<OutputFlags, SimpleError> {
        if bits & !(TRACE_BIT | TRACK_BEST_VERTEX_BIT | RECORD_HISTORY_BIT) != 0 {
            return Err(SimpleError::new(format!(
                "unrecognized output flag bits in {:#05b}",
                bits
            )));
        }
        Ok(OutputFlags {
            trace: bits & TRACE_BIT != 0,
            track_best_vertex: bits & TRACK_BEST_VERTEX_BIT != 0,
            record_history: bits & RECORD_HISTORY_BIT != 0,
        })
    }

    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.trace {
            bits |= TRACE_BIT;
        }
        if self.track_best_vertex {
            bits |= TRACK_BEST_VERTEX_BIT;
        }
        if self.record_history {
            bits |= RECORD_HISTORY_BIT;
        }
        bits
    }

    /// True when the best vertex coordinates should be printed
    pub(crate) fn prints_best_vertex(&self) -> bool {
        self.trace && self.track_best_vertex
    }

    fn from_name(val: &str) -> Result<OutputFlags, SimpleError> {
        match val.to_lowercase().as_str() {
            "trace" => Ok(OutputFlags::new().with_trace(true)),
            "track_best_vertex" | "best_vertex" => {
                Ok(OutputFlags::new().with_track_best_vertex(true))
            }
            "record_history" | "history" => Ok(OutputFlags::new().with_record_history(true)),
            "none" => Ok(OutputFlags::new()),
            _ => bail!("output flag not recognized"),
        }
    }
}

impl FromStr for OutputFlags {
    type Err = SimpleError;

    fn from_str(val: &str) -> Result<OutputFlags, SimpleError> {
        let val = val.trim();
        static RE_BINARY: OnceLock<Regex> = OnceLock::new();
        static RE_DECIMAL: OnceLock<Regex> = OnceLock::new();
        static RE_SEPARATOR: OnceLock<Regex> = OnceLock::new();
        let re_binary =
            RE_BINARY.get_or_init(|| Regex::new(r"^0[bB]([01]{1,8})$").expect("Invalid regex!"));
        let re_decimal =
            RE_DECIMAL.get_or_init(|| Regex::new(r"^\d{1,3}$").expect("Invalid regex!"));
        let re_separator =
            RE_SEPARATOR.get_or_init(|| Regex::new(r"\s*[|,]\s*").expect("Invalid regex!"));

        if let Some(caps) = re_binary.captures(val) {
            let bits = u8::from_str_radix(&caps[1], 2).map_err(SimpleError::from)?;
            return OutputFlags::from_bits(bits);
        }
        if re_decimal.is_match(val) {
            let bits: u8 = val.parse().map_err(SimpleError::from)?;
            return OutputFlags::from_bits(bits);
        }
        if val.is_empty() {
            return Ok(OutputFlags::new());
        }

        let mut bits = 0;
        for name in re_separator.split(val) {
            bits |= OutputFlags::from_name(name)?.bits();
        }
        OutputFlags::from_bits(bits)
    }
}

impl fmt::Display for OutputFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names = vec![];
        if self.trace {
            names.push("trace");
        }
        if self.track_best_vertex {
            names.push("track_best_vertex");
        }
        if self.record_history {
            names.push("record_history");
        }
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}
