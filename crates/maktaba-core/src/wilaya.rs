//! # Wilaya Reference Table
//!
//! Immutable lookup table for the 58 Algerian wilayas (first-level
//! administrative regions). Used as the geographic key for delivery pricing
//! and the orders-by-region analytics.
//!
//! The table is a single static slice with lookup helpers; wilaya codes
//! are stable administrative data and never come from the database.

/// Number of wilayas.
pub const WILAYA_COUNT: usize = 58;

/// (code, name) pairs, ordered by code 1..=58.
pub static WILAYAS: &[(i64, &str)] = &[
    (1, "Adrar"),
    (2, "Chlef"),
    (3, "Laghouat"),
    (4, "Oum El Bouaghi"),
    (5, "Batna"),
    (6, "Béjaïa"),
    (7, "Biskra"),
    (8, "Béchar"),
    (9, "Blida"),
    (10, "Bouira"),
    (11, "Tamanrasset"),
    (12, "Tébessa"),
    (13, "Tlemcen"),
    (14, "Tiaret"),
    (15, "Tizi Ouzou"),
    (16, "Alger"),
    (17, "Djelfa"),
    (18, "Jijel"),
    (19, "Sétif"),
    (20, "Saïda"),
    (21, "Skikda"),
    (22, "Sidi Bel Abbès"),
    (23, "Annaba"),
    (24, "Guelma"),
    (25, "Constantine"),
    (26, "Médéa"),
    (27, "Mostaganem"),
    (28, "M'Sila"),
    (29, "Mascara"),
    (30, "Ouargla"),
    (31, "Oran"),
    (32, "El Bayadh"),
    (33, "Illizi"),
    (34, "Bordj Bou Arréridj"),
    (35, "Boumerdès"),
    (36, "El Tarf"),
    (37, "Tindouf"),
    (38, "Tissemsilt"),
    (39, "El Oued"),
    (40, "Khenchela"),
    (41, "Souk Ahras"),
    (42, "Tipaza"),
    (43, "Mila"),
    (44, "Aïn Defla"),
    (45, "Naâma"),
    (46, "Aïn Témouchent"),
    (47, "Ghardaïa"),
    (48, "Relizane"),
    (49, "El M'Ghair"),
    (50, "El Meniaa"),
    (51, "Ouled Djellal"),
    (52, "Bordj Baji Mokhtar"),
    (53, "Béni Abbès"),
    (54, "Timimoun"),
    (55, "Touggourt"),
    (56, "Djanet"),
    (57, "In Salah"),
    (58, "In Guezzam"),
];

/// Resolves a wilaya code to its name.
///
/// Codes are dense (1..=58) so this is a direct index, not a scan.
pub fn wilaya_name(id: i64) -> Option<&'static str> {
    if !(1..=WILAYA_COUNT as i64).contains(&id) {
        return None;
    }
    Some(WILAYAS[(id - 1) as usize].1)
}
