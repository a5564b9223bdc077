//! Sample catalog used by `cinepair seed` and the integration tests.

use anyhow::Result;
use tracing::info;

use crate::db::Store;
use crate::models::NewMovie;

const POSTER: &str = "/placeholder.svg?height=400&width=300";
const BACKDROP: &str = "/placeholder.svg?height=400&width=800";

pub struct SampleMovie {
    pub title: &'static str,
    pub description: &'static str,
    pub genre: &'static [&'static str],
    pub year: i32,
    pub rating: f64,
    pub duration: i32,
}

impl SampleMovie {
    fn to_new_movie(&self) -> NewMovie {
        NewMovie {
            title: self.title.to_string(),
            description: self.description.to_string(),
            poster: POSTER.to_string(),
            backdrop: Some(BACKDROP.to_string()),
            genre: self.genre.iter().map(ToString::to_string).collect(),
            year: self.year,
            rating: self.rating,
            duration: self.duration,
        }
    }
}

pub const SAMPLE_MOVIES: &[SampleMovie] = &[
    SampleMovie {
        title: "The Princess Bride",
        description: "A classic fairy tale adventure with romance, comedy, and swashbuckling action. When a young woman is kidnapped, her true love embarks on a quest to rescue her.",
        genre: &["Romance", "Adventure", "Comedy"],
        year: 1987,
        rating: 8.1,
        duration: 98,
    },
    SampleMovie {
        title: "Casablanca",
        description: "A timeless romantic drama set in wartime Morocco. An American expatriate must choose between his love for a woman and helping her husband escape the Nazis.",
        genre: &["Romance", "Drama"],
        year: 1942,
        rating: 8.5,
        duration: 102,
    },
    SampleMovie {
        title: "When Harry Met Sally",
        description: "A romantic comedy about friendship and love in New York City. Can men and women really be just friends?",
        genre: &["Romance", "Comedy"],
        year: 1989,
        rating: 7.7,
        duration: 96,
    },
    SampleMovie {
        title: "The Notebook",
        description: "A passionate love story that spans decades. An elderly man reads to a woman with dementia from a notebook detailing their courtship.",
        genre: &["Romance", "Drama"],
        year: 2004,
        rating: 7.8,
        duration: 123,
    },
    SampleMovie {
        title: "Inception",
        description: "A mind-bending thriller about dreams within dreams. A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
        genre: &["Sci-Fi", "Thriller"],
        year: 2010,
        rating: 8.8,
        duration: 148,
    },
    SampleMovie {
        title: "La La Land",
        description: "A modern musical about love and dreams in Los Angeles. A jazz musician and an aspiring actress fall in love while pursuing their dreams.",
        genre: &["Romance", "Musical", "Drama"],
        year: 2016,
        rating: 8.0,
        duration: 128,
    },
];

/// Inserts each sample movie whose title is not in the catalog yet.
/// Returns how many were created.
pub async fn seed_sample_movies(store: &Store) -> Result<usize> {
    let mut created = 0;

    for sample in SAMPLE_MOVIES {
        if store.find_movie_by_title(sample.title).await?.is_some() {
            info!(title = sample.title, "Movie already exists");
            continue;
        }

        store.create_movie(&sample.to_new_movie()).await?;
        created += 1;
    }

    info!(created, total = SAMPLE_MOVIES.len(), "Movie seeding completed");
    Ok(created)
}
