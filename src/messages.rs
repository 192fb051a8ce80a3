//! Response message strings shared by the handlers and error mapping.
//!
//! These are part of the wire contract: clients match on them verbatim, so
//! they are kept in one place rather than inlined at each call site.

pub const INVALID_EMPLOYEE: &str = "Invalid employee ID sent in the request.";
pub const NO_EMPLOYEE: &str = "Employee not found.";
pub const INVALID_SUPERIOR: &str = "Invalid superior ID.";
pub const MISSING_DETAILS: &str = "Missing one or more employee details.";
pub const INVALID_EMPLOYEE_DATA: &str = "Invalid employee data sent in the request.";
pub const INVALID_EMPLOYEE_NAME: &str = "Invalid employee name sent in the request.";
pub const EMPLOYEE_ADDED: &str = "Employee added successfully.";
pub const EMPLOYEE_UPDATED: &str = "Employee updated successfully.";
pub const EMPLOYEE_DELETED: &str =
    "Employee deleted successfully and the no.of subordinates that had their superior unassigned is";
pub const NO_HIERARCH: &str = "Unable to find hierarch for employee";
