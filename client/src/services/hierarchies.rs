use shared::{Hierarchy, HierarchyPayload};

super::service!(
    /// Manager to collection-officer assignments.
    HierarchyService,
    Hierarchy,
    HierarchyPayload,
    "hierarchies/"
);
