//! Named central-Bohemian towns for realistic coordinates.
//!
//! Great-circle costs over these are a true metric, which the
//! approximation tests rely on.

/// A named site with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Site {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }
}

pub const SITES: &[Site] = &[
    Site::new("Kladno", 50.1473, 14.1028),
    Site::new("Beroun", 49.9639, 14.0720),
    Site::new("Pribram", 49.6895, 14.0101),
    Site::new("Benesov", 49.7816, 14.6870),
    Site::new("Kolin", 50.0282, 15.2006),
    Site::new("Mlada Boleslav", 50.4113, 14.9032),
    Site::new("Melnik", 50.3505, 14.4742),
    Site::new("Rakovnik", 50.1037, 13.7337),
    Site::new("Slany", 50.2305, 14.0869),
    Site::new("Kutna Hora", 49.9484, 15.2682),
    Site::new("Tabor", 49.4144, 14.6578),
    Site::new("Pisek", 49.3088, 14.1475),
    Site::new("Plzen", 49.7384, 13.3736),
    Site::new("Pardubice", 50.0343, 15.7812),
    Site::new("Nymburk", 50.1860, 15.0416),
    Site::new("Vlasim", 49.7063, 14.8989),
];

/// Prague city centre, the usual depot.
pub const PRAGUE: Site = Site::new("Praha", 50.0755, 14.4378);

/// Hradec Kralove, a far-side endpoint.
pub const HRADEC: Site = Site::new("Hradec Kralove", 50.2092, 15.8328);
