use std::io::Read;
use std::ops::Range;

use markup::ast::{Document, Element};
use util::{HashMap, Hasher, IdVec};

use crate::{Error, LightId, PhaseProgram, ReadError, ID_ATTR, TL_LOGIC};

/// Where to look for `tlLogic` elements in a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Only direct children of the root element.
    #[default]
    TopLevel,
    /// Anywhere in the document, including the root itself.
    /// Elements inside a program are never treated as programs.
    AnyDepth,
}

/// All phase programs from one document, keyed by traffic light id.
///
/// The table is built in one pass when it is created and can't be modified afterwards.
#[derive(Debug)]
pub struct PhaseProgramTable {
    /// Names the document the table was read from, for error messages.
    origin: String,
    /// Programs in document order.
    programs: IdVec<LightId, PhaseProgram>,
    lookup: HashMap<String, LightId>,
}

// construction //////////////
impl PhaseProgramTable {
    /// Parse `text`, looking for programs at the top level only.
    /// `origin` names the text (usually a file path) in error messages.
    pub fn parse(origin: &str, text: &str) -> Result<Self, Error> {
        Self::parse_with(origin, text, Scan::default())
    }

    /// Parse `text`, looking for programs according to `scan`.
    pub fn parse_with(origin: &str, text: &str, scan: Scan) -> Result<Self, Error> {
        let doc = markup::parse(text).map_err(|e| Error::SourceRead {
            origin: origin.to_owned(),
            cause: ReadError::from(e),
        })?;
        Self::from_document(origin, &doc, scan)
    }

    /// Read `reader` to the end and parse what it produced.
    pub fn from_reader<R: Read>(origin: &str, mut reader: R, scan: Scan) -> Result<Self, Error> {
        let mut text = String::with_capacity(4096);
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::SourceRead {
                origin: origin.to_owned(),
                cause: ReadError::from(e),
            })?;
        Self::parse_with(origin, &text, scan)
    }

    /// Build a table from an already-parsed document.
    pub fn from_document(origin: &str, doc: &Document, scan: Scan) -> Result<Self, Error> {
        let elements = find_programs(&doc.root, scan);
        let mut programs = IdVec::with_capacity(elements.len());
        let mut lookup = HashMap::with_capacity_and_hasher(elements.len(), Hasher::default());

        for (ordinal, element) in elements.into_iter().enumerate() {
            let light = element.attr(ID_ATTR).ok_or_else(|| Error::MissingLightId {
                origin: origin.to_owned(),
                ordinal,
            })?;
            if lookup.contains_key(light) {
                return Err(Error::DuplicateLightId {
                    origin: origin.to_owned(),
                    light: light.to_owned(),
                });
            }
            let program = PhaseProgram::read(light, element)?;
            log::trace!("traffic light \"{}\": {} phases", light, program.len());
            let id = programs.push(program);
            lookup.insert(light.to_owned(), id);
        }

        log::debug!(
            "Loaded {} traffic light programs from \"{}\" ({:?} scan)",
            programs.len(),
            origin,
            scan,
        );

        Ok(Self {
            origin: origin.to_owned(),
            programs,
            lookup,
        })
    }
}

fn find_programs<'d, 'a>(root: &'d Element<'a>, scan: Scan) -> Vec<&'d Element<'a>> {
    match scan {
        Scan::TopLevel => root
            .child_elements()
            .filter(|element| element.name == TL_LOGIC)
            .collect(),
        Scan::AnyDepth => root.find_all(TL_LOGIC),
    }
}

// queries ////////////////
impl PhaseProgramTable {
    /// Name of the document this table was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of traffic lights.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// True if there's a program for `light`.
    pub fn contains(&self, light: &str) -> bool {
        self.lookup.contains_key(light)
    }

    /// Traffic light ids, in the order they appear in the document.
    pub fn light_ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.programs.iter().map(PhaseProgram::light_id)
    }

    /// All programs, in the order they appear in the document.
    pub fn programs(&self) -> impl ExactSizeIterator<Item = &PhaseProgram> + '_ {
        self.programs.iter()
    }

    /// The program for `light`.
    pub fn program(&self, light: &str) -> Result<&PhaseProgram, Error> {
        self.lookup
            .get(light)
            .map(|&id| self.programs.get(id))
            .ok_or_else(|| Error::UnknownLightId(light.to_owned()))
    }

    /// Valid phase indices for `light`, i.e. `0..n` for a program with `n` phases.
    pub fn phase_indices(&self, light: &str) -> Result<Range<usize>, Error> {
        Ok(self.program(light)?.indices())
    }

    /// The phase token at `index` in the program for `light`.
    pub fn phase_state(&self, light: &str, index: usize) -> Result<&str, Error> {
        let program = self.program(light)?;
        program
            .phase(index)
            .ok_or_else(|| Error::PhaseIndexOutOfRange {
                light: light.to_owned(),
                index,
                len: program.len(),
            })
    }
}
