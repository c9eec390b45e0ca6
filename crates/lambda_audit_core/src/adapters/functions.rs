use crate::model::FunctionRecord;
use crate::pagination::Page;

pub trait FunctionLister {
    /// One page of functions; `marker` is the previous page's continuation marker.
    fn list_functions(&self, marker: Option<&str>) -> Result<Page<FunctionRecord>, String>;
}
