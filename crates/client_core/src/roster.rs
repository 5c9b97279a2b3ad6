use serde::Serialize;
use shared::domain::ArtistId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub specialty: String,
    pub portfolio_image: String,
}

/// The static set of artists open for commissions.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    artists: Vec<Artist>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::fixed()
    }
}

impl Roster {
    pub fn fixed() -> Self {
        let artists = (1..=3)
            .map(|id| Artist {
                id: ArtistId(id),
                name: format!("Artist {id}"),
                specialty: "Specializes in fantasy portraits & digital realism.".into(),
                portfolio_image: format!("/artists/sample{id}.jpg"),
            })
            .collect();
        Self { artists }
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn get(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == id)
    }
}
