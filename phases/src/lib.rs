//! Phase programs of SUMO traffic lights.
//!
//! The document format follows SUMO's
//! [TLS program definitions](https://sumo.dlr.de/docs/Simulation/Traffic_Lights.html#defining_new_tls-programs):
//! every `<tlLogic id="...">` element is one program, and each of its child
//! elements (normally `<phase>`) contributes one phase, read from its `state` attribute.

mod id;
use id::LightId;

mod program;
pub use program::PhaseProgram;

mod table;
pub use table::{PhaseProgramTable, Scan};

/// Name of elements holding a traffic light program.
pub const TL_LOGIC: &str = "tlLogic";
/// Attribute of a program element naming the traffic light.
pub const ID_ATTR: &str = "id";
/// Attribute of a phase element holding the phase token.
pub const STATE_ATTR: &str = "state";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to read traffic light programs from \"{origin}\"")]
    SourceRead {
        origin: String,
        #[source]
        cause: ReadError,
    },
    #[error("\"{origin}\" contains multiple tlLogic elements with id=\"{light}\"")]
    DuplicateLightId { origin: String, light: String },
    #[error("tlLogic element #{ordinal} in \"{origin}\" has no id attribute")]
    MissingLightId { origin: String, ordinal: usize },
    #[error("Phase {index} of traffic light \"{light}\" has no state attribute")]
    MalformedPhase { light: String, index: usize },
    #[error("Unknown traffic light \"{0}\"")]
    UnknownLightId(String),
    #[error("Phase {index} is out of range for traffic light \"{light}\" ({len} phases)")]
    PhaseIndexOutOfRange {
        light: String,
        index: usize,
        len: usize,
    },
}

/// Why a source document couldn't be turned into an element tree.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Markup(#[from] markup::Error),
}
