use std::ops::Range;

use markup::ast::Element;

use crate::{Error, STATE_ATTR};

/// The ordered phases of a single traffic light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseProgram {
    light_id: String,
    phases: Vec<String>,
}

impl PhaseProgram {
    /// Read the phases of `element`, which defines the program for `light_id`.
    /// Every child element is a phase, numbered from 0 in document order.
    pub(crate) fn read(light_id: &str, element: &Element) -> Result<Self, Error> {
        let phases = element
            .child_elements()
            .enumerate()
            .map(|(index, phase)| {
                phase
                    .attr(STATE_ATTR)
                    .map(str::to_owned)
                    .ok_or_else(|| Error::MalformedPhase {
                        light: light_id.to_owned(),
                        index,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            light_id: light_id.to_owned(),
            phases,
        })
    }

    /// Id of the traffic light this program controls.
    pub fn light_id(&self) -> &str {
        &self.light_id
    }

    /// Phase tokens in index order.
    pub fn phases(&self) -> &[String] {
        &self.phases
    }

    /// The phase token at `index`, if there is one.
    pub fn phase(&self, index: usize) -> Option<&str> {
        self.phases.get(index).map(String::as_str)
    }

    /// Valid phase indices, `0..len`.
    pub fn indices(&self) -> Range<usize> {
        0..self.phases.len()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}
