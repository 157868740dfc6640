use crate::{
    codec::Catalog,
    error::Error,
    formats::Target,
    types::{Glossary, OutputFile},
};

/// Serializes a loaded catalog into the files of one target platform.
///
/// Implementations are pure: they never touch the filesystem, the caller
/// decides where the returned files go.
pub trait Encoder {
    /// The platform this encoder writes for.
    fn target(&self) -> Target;

    /// Encodes every locale of `catalog` the target needs.
    fn encode(&self, catalog: &Catalog, glossary: &Glossary) -> Result<Vec<OutputFile>, Error>;
}
