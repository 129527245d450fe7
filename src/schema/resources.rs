//! The four department schemas

use super::types::{FieldDef, ResourceSchema};

/// Admin department staff
pub static ADMIN: ResourceSchema = ResourceSchema {
    collection: "admin",
    model: "Admin",
    entity: "Admin",
    subject: "admin",
    singular: "admin",
    article: "an",
    plural: "admins",
    item: "admin",
    tag_description: "Admin department management",
    fields: &[
        FieldDef::required_text("name", "The admin name"),
        FieldDef::required_text("role", "The admin role"),
    ],
};

/// Engineering department projects
pub static ENGINEERING: ResourceSchema = ResourceSchema {
    collection: "engineering",
    model: "Engineering",
    entity: "Project",
    subject: "project",
    singular: "engineering project",
    article: "an",
    plural: "engineering projects",
    item: "project",
    tag_description: "Engineering department management",
    fields: &[
        FieldDef::required_text("name", "The project name"),
        FieldDef::required_text("project", "The project description"),
    ],
};

/// Operations department staff
pub static OPERATIONS: ResourceSchema = ResourceSchema {
    collection: "operations",
    model: "Operations",
    entity: "Staff",
    subject: "staff",
    singular: "operations staff member",
    article: "an",
    plural: "operations staff",
    item: "staff member",
    tag_description: "Operations department management",
    fields: &[
        FieldDef::required_text("name", "The staff name"),
        FieldDef::required_text("shift", "The staff shift"),
    ],
};

/// Security department staff
pub static SECURITY: ResourceSchema = ResourceSchema {
    collection: "security",
    model: "Security",
    entity: "Staff",
    subject: "staff",
    singular: "security staff member",
    article: "a",
    plural: "security staff",
    item: "staff member",
    tag_description: "Security department management",
    fields: &[
        FieldDef::required_text("name", "The staff name"),
        FieldDef::required_text("clearanceLevel", "The staff clearance level"),
    ],
};

/// Every department, in mount order
pub static ALL: [&ResourceSchema; 4] = [&ADMIN, &ENGINEERING, &OPERATIONS, &SECURITY];

/// Find a department schema by collection name
pub fn lookup(collection: &str) -> Option<&'static ResourceSchema> {
    ALL.iter().copied().find(|s| s.collection == collection)
}

/// Collection names of every department
pub fn collections() -> Vec<&'static str> {
    ALL.iter().map(|s| s.collection).collect()
}
