//! Facet values offered by the gallery filters and the admin item form

pub const CATEGORY_OPTIONS: &[&str] = &[
    "Persian",
    "Oriental",
    "Kilim",
    "Modern",
    "Traditional",
    "Turkish",
    "Afghan",
    "Vintage",
    "Tribal",
    "Machine-Made",
    "Handmade",
];

pub const SIZE_OPTIONS: &[&str] = &[
    "Small (90x150)",
    "Medium (150x220)",
    "Large (200x300)",
    "Extra Large (300x400)",
    "Runner (80x300)",
    "Square",
    "Round",
];

pub const MATERIAL_OPTIONS: &[&str] = &[
    "Wool",
    "Silk",
    "Cotton",
    "Bamboo Silk",
    "Polyester",
    "Viscose",
    "Synthetic",
    "Blend",
];

pub const COLOR_OPTIONS: &[&str] = &[
    "Red",
    "Blue",
    "Navy",
    "Ivory",
    "Beige",
    "Rust",
    "Grey",
    "Black",
    "Green",
    "Brown",
    "Multi-Color",
];
