//! Semantic slots of a trait row and their fixed graph vocabulary.

pub const ORGANISM_TAXON: &str = "biolink:OrganismTaxon";
pub const CHEMICAL_SUBSTANCE: &str = "biolink:ChemicalSubstance";
pub const ABSTRACT_ENTITY: &str = "biolink:AbstractEntity";
pub const ACTIVITY_AND_BEHAVIOR: &str = "biolink:ActivityAndBehavior";
pub const BIOLOGICAL_PROCESS: &str = "biolink:BiologicalProcess";

/// CURIE prefix of organism ids; ids with it are seeds for subset extraction.
pub const NCBI_TAXON: &str = "NCBITaxon:";
/// CURIE prefix that gives isolation-source nodes the chemical category.
pub const CHEBI: &str = "CHEBI:";

/// A column group of the trait table resolved to graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Organism,
    Chemical,
    Shape,
    Source,
    Metabolism,
    Pathway,
}

impl Slot {
    /// Prefix for ids derived from the raw term. Metabolism ids come from the table.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Organism => NCBI_TAXON,
            Self::Chemical => "microtraits.carbon_substrates:",
            Self::Shape => "microtraits.cell_shape_enum:",
            Self::Source => "microtraits.data_source:",
            Self::Metabolism => "",
            Self::Pathway => "microtraits.pathways:",
        }
    }

    /// Default node category.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Organism => ORGANISM_TAXON,
            Self::Chemical => CHEMICAL_SUBSTANCE,
            Self::Shape => ABSTRACT_ENTITY,
            Self::Source => "",
            Self::Metabolism => ACTIVITY_AND_BEHAVIOR,
            Self::Pathway => BIOLOGICAL_PROCESS,
        }
    }

    /// (predicate, relation) of the organism → slot edge.
    pub fn edge(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Organism => None,
            Self::Chemical => Some(("biolink:interacts_with", "RO:0002438")),
            Self::Shape => Some(("biolink:has_phenotype", "RO:0002200")),
            Self::Source => Some(("biolink:location_of", "RO:0001015")),
            Self::Metabolism | Self::Pathway => Some(("biolink:capable_of", "RO:0002215")),
        }
    }
}
