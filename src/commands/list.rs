//! List site content

use anyhow::Result;
use std::path::Path;
use walkdir::WalkDir;

use crate::generator::Generator;
use crate::helpers::DateFormatter;
use crate::pages::PostList;
use crate::Blog;

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let source = blog.content_source()?;
            let generator = Generator::new(blog, source.clone())?;
            let mut list = PostList::new(generator.fetch_home().await?);
            list.load_all(source.as_ref()).await?;

            let dates = DateFormatter::from_config(&blog.config)?;
            println!("Posts ({}):", list.len());
            for post in list.results() {
                let date = post
                    .first_publication_date
                    .as_deref()
                    .map(|d| dates.format(d).unwrap_or_else(|_| d.to_string()))
                    .unwrap_or_else(|| "unpublished".to_string());
                println!(
                    "  {} - {} [{}]",
                    date,
                    post.data.title,
                    post.uid.as_deref().unwrap_or("-")
                );
            }
        }
        "route" | "routes" => {
            let routes = generated_routes(&blog.public_dir);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, route", content_type);
        }
    }

    Ok(())
}

/// URL paths of every generated page under `public_dir`, sorted
pub fn generated_routes(public_dir: &Path) -> Vec<String> {
    let mut routes: Vec<String> = WalkDir::new(public_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == "index.html")
        .filter_map(|e| {
            let relative = e.path().parent()?.strip_prefix(public_dir).ok()?;
            let segments: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if segments.is_empty() {
                Some("/".to_string())
            } else {
                Some(format!("/{}/", segments.join("/")))
            }
        })
        .collect();

    routes.sort();
    routes
}
