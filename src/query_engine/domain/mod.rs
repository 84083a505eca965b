/// Domain entities of the two services plus the query parameter model
pub mod component;
pub mod flaw;
pub mod page;
pub mod parameters;
pub mod product;

pub use component::{Component, ComponentRef, ProductRef};
pub use flaw::{Affect, Flaw, Tracker};
pub use page::{Page, PageWindow};
pub use parameters::{Conditions, ParameterSpec, QueryParameters};
pub use product::{Manifest, ProductStream, ProductVersion};
