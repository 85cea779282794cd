//! Subcommand implementations. Each returns the number of per-file problems
//! it reported so `main` can pick the exit status.

use lookbook_core::ports::PostRepository;
use lookbook_infra::{
    CatalogStore, FileFailure, PostFileRepository, export_catalog_to_files,
    rebuild_catalog_from_files,
};

fn print_failures(failures: &[FileFailure]) {
    for failure in failures {
        eprintln!("  ! {}: {}", failure.file.display(), failure.error);
    }
}

pub async fn export(files: &PostFileRepository, prune: bool) -> anyhow::Result<usize> {
    let catalog = CatalogStore::seeded(files.config().defaults.clone());
    let report = export_catalog_to_files(&catalog, files).await?;

    println!(
        "Exported {} post(s) to {}",
        report.written.len(),
        files.dir().display()
    );
    print_failures(&report.failures);
    let mut problems = report.failed();

    if prune {
        let posts = catalog.list(None).await?;
        let pruned = files.prune_orphans(&posts).await;
        for name in &pruned.removed {
            println!("  - removed {}", name);
        }
        print_failures(&pruned.failures);
        problems += pruned.failures.len();
    }

    Ok(problems)
}

pub async fn inspect(files: &PostFileRepository, recent: usize) -> anyhow::Result<usize> {
    let rebuild = rebuild_catalog_from_files(files).await;
    let store = &rebuild.store;

    println!("Directory:   {}", files.dir().display());
    println!("Posts:       {}", store.len().await);
    println!("Next id:     {}", store.next_id().await);

    let featured = store.list_featured(None).await?;
    println!("Featured:    {}", featured.len());
    for post in &featured {
        println!("  [{}] #{} {}", post.featured, post.id, post.title);
    }

    println!("Most recent:");
    for post in store.list_recent(Some(recent)).await? {
        println!(
            "  {} #{} {} ({})",
            post.published_at.format("%Y-%m-%d"),
            post.id,
            post.title,
            files.filename_for(&post)
        );
    }

    if !rebuild.duplicate_ids.is_empty() {
        println!("Duplicate ids (older copies ignored): {:?}", rebuild.duplicate_ids);
    }
    print_failures(&rebuild.load_failures);

    Ok(rebuild.load_failures.len() + rebuild.duplicate_ids.len())
}

pub async fn normalize(files: &PostFileRepository) -> anyhow::Result<usize> {
    let report = files.normalize_filenames().await;

    for (from, to) in &report.renamed {
        println!("  {} -> {}", from, to);
    }
    for (from, to) in &report.conflicts {
        eprintln!("  ! {} not renamed, {} already exists", from, to);
    }
    print_failures(&report.failures);
    println!(
        "Renamed {}, unchanged {}, conflicts {}, unreadable {}",
        report.renamed.len(),
        report.unchanged,
        report.conflicts.len(),
        report.failures.len()
    );

    Ok(report.conflicts.len() + report.failures.len())
}
