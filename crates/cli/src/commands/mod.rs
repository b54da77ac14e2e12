pub(crate) mod migrate;
pub(crate) mod purge;
pub(crate) mod serve;
