//! Sample catalogue for local development.

use anyhow::Context;

use crate::catalog::Catalog;
use crate::modules::authors::models::NewAuthor;
use crate::modules::books::models::NewBook;

struct SeedAuthor {
    author: &'static str,
    birth_year: i64,
    nationality: &'static str,
    books: &'static [(&'static str, i64)],
}

const SEED: &[SeedAuthor] = &[
    SeedAuthor {
        author: "Jane Austen",
        birth_year: 1775,
        nationality: "British",
        books: &[("Pride and Prejudice", 1813), ("Emma", 1815)],
    },
    SeedAuthor {
        author: "Mary Shelley",
        birth_year: 1797,
        nationality: "British",
        books: &[("Frankenstein", 1818)],
    },
    SeedAuthor {
        author: "Leo Tolstoy",
        birth_year: 1828,
        nationality: "Russian",
        books: &[("War and Peace", 1869), ("Anna Karenina", 1878)],
    },
    SeedAuthor {
        author: "Chinua Achebe",
        birth_year: 1930,
        nationality: "Nigerian",
        books: &[("Things Fall Apart", 1958)],
    },
    SeedAuthor {
        author: "Gabriel García Márquez",
        birth_year: 1927,
        nationality: "Colombian",
        books: &[("One Hundred Years of Solitude", 1967)],
    },
];

/// Rows written by [`seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub authors: usize,
    pub books: usize,
}

/// Insert the sample catalogue unless authors already exist.
pub async fn seed(catalog: &dyn Catalog) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    if !catalog
        .find_all_authors()
        .await
        .context("failed to inspect authors table")?
        .is_empty()
    {
        tracing::info!("authors table is not empty; skipping seed");
        return Ok(report);
    }

    for entry in SEED {
        let author_id = catalog
            .insert_author(&NewAuthor {
                author: entry.author.to_string(),
                birth_year: entry.birth_year,
                nationality: entry.nationality.to_string(),
            })
            .await
            .with_context(|| format!("failed to seed author '{}'", entry.author))?;
        report.authors += 1;

        for (title, published) in entry.books {
            catalog
                .insert_book(&NewBook {
                    title: title.to_string(),
                    author_id,
                    published: *published,
                })
                .await
                .with_context(|| format!("failed to seed book '{title}'"))?;
            report.books += 1;
        }
    }

    tracing::info!(authors = report.authors, books = report.books, "catalogue seeded");
    Ok(report)
}
