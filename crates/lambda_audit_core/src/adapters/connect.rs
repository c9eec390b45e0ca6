use super::{FunctionLister, IamReader};

/// Builds region-scoped clients. Called once per scanned region.
pub trait RegionConnector {
    type Functions: FunctionLister;
    type Iam: IamReader;

    fn connect(&self, region: &str) -> Result<(Self::Functions, Self::Iam), String>;
}
