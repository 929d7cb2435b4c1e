/// Categories used when the category file is missing, unreadable, or empty
///
/// Columns: scope, category, subcategory, default assignee, SLA hours.
pub const DEFAULT_CATEGORIES: &[[&str; 5]] = &[
    ["PMO", "Elevator", "Stuck - car not moving", "Elevator Team", "1"],
    ["PMO", "Security", "Unauthorized access", "Security Desk", "4"],
    ["PMO", "Structural", "Cracks or holes", "Engineering", "24"],
    ["PMO", "Amenities", "Clubhouse request", "Admin", "24"],
    ["PMO", "Billing", "SOA concern", "Finance", "48"],
    ["PMO", "Staff", "House rules compliance", "Admin", "24"],
    ["PMO", "Community", "Noise or smoking", "Security Desk", "8"],
    ["PMO", "Admin", "Document request", "Admin", "48"],
    ["InBuilding", "Plumbing", "Leak under sink", "Building Plumber", "24"],
    ["InBuilding", "Electrical", "No power in room", "Building Electrician", "24"],
    ["InBuilding", "ACU", "Water drip", "HVAC Tech", "24"],
    ["InBuilding", "Housekeeping", "Spill cleanup", "Janitorial", "8"],
    ["InBuilding", "Parking", "Blocked slot", "Parking Marshal", "4"],
    ["InBuilding", "Pets", "Leash/collar complaint", "Security Desk", "8"],
];

/// Header line of the category reference file
pub const CATEGORY_HEADER: &str = "scope,category,subcategory,default_assignee,default_sla_hours";

/// Header line of the unit reference file
pub const UNIT_HEADER: &str = "unit_code,floor,notes";

/// Category file contents matching [`DEFAULT_CATEGORIES`]
pub fn default_categories_csv() -> String {
    let mut csv = String::from(CATEGORY_HEADER);
    for row in DEFAULT_CATEGORIES {
        csv.push('\n');
        csv.push_str(&row.join(","));
    }
    csv.push('\n');
    csv
}
