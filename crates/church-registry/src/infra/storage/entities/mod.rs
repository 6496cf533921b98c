pub mod church;
pub mod church_pastor;
pub mod church_role;
pub mod district;
pub mod pastor;
pub mod section;
