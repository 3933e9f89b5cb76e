mod generation;
mod sample;
mod search;
mod term;

pub use generation::{BuildReport, GenerationInfo, GenerationRole};
pub use sample::{
    Attribute, DisplayTerm, Experiment, SampleGroup, SampleGroupView, SampleMember, SampleRecord,
    SampleType, Study,
};
pub use search::{
    SampleQuery, SampleQueryParams, SampleSearchResult, StudyResult, TermFacet, TermLookupResult,
    TermQuery, TermQueryParams,
};
pub use term::{TermEntry, TermView};
