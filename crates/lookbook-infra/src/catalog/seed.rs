//! Built-in sample content for the seeded catalog.

use chrono::{TimeZone, Utc};

use lookbook_core::domain::NewPost;

struct Sample {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    category: &'static str,
    location: &'static str,
    cover_image: &'static str,
    published: (i32, u32, u32),
    featured: u32,
    read_time: u32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Capsule Wardrobe Essentials for Spring",
        excerpt: "Ten pieces that carry you from March showers to May sunshine.",
        content: "<p>A capsule wardrobe starts with pieces that work together. \
                  Begin with a trench, a white shirt and well-cut denim.</p>",
        category: "Fashion",
        location: "Paris",
        cover_image: "/images/posts/capsule-wardrobe.jpg",
        published: (2024, 3, 4),
        featured: 3,
        read_time: 6,
    },
    Sample {
        title: "A Slow Weekend in Lisbon",
        excerpt: "Tiled streets, custard tarts and the best sunset viewpoints.",
        content: "<p>Lisbon rewards the unhurried. Spend the morning in Alfama \
                  and the evening at a miradouro.</p>",
        category: "Travel",
        location: "Lisbon",
        cover_image: "/images/posts/lisbon-weekend.jpg",
        published: (2024, 3, 18),
        featured: 2,
        read_time: 8,
    },
    Sample {
        title: "My Five-Minute Morning Skincare Routine",
        excerpt: "Cleanse, hydrate, protect. Nothing more.",
        content: "<p>Skincare does not need twelve steps. A gentle cleanser, a \
                  light moisturizer and sunscreen cover the essentials.</p>",
        category: "Beauty",
        location: "London",
        cover_image: "/images/posts/morning-skincare.jpg",
        published: (2024, 4, 2),
        featured: 0,
        read_time: 4,
    },
    Sample {
        title: "Styling Linen for Summer Evenings",
        excerpt: "How to keep linen looking polished after sunset.",
        content: "<p>Linen creases, and that is part of its charm. Pair a relaxed \
                  shirt with tailored trousers and leather sandals.</p>",
        category: "Fashion",
        location: "Milan",
        cover_image: "/images/posts/summer-linen.jpg",
        published: (2024, 5, 20),
        featured: 1,
        read_time: 5,
    },
    Sample {
        title: "Creating a Calm Reading Corner at Home",
        excerpt: "Light, texture and one very good armchair.",
        content: "<p>A reading corner needs less than you think: warm light, a \
                  throw and a shelf within reach.</p>",
        category: "Lifestyle",
        location: "Copenhagen",
        cover_image: "/images/posts/reading-corner.jpg",
        published: (2024, 6, 11),
        featured: 0,
        read_time: 5,
    },
];

/// Sample posts in publication order, linked prev/next by their future ids
/// (1-based position in the list).
pub(super) fn sample_posts() -> Vec<NewPost> {
    let count = SAMPLES.len() as u64;
    SAMPLES
        .iter()
        .zip(1u64..)
        .map(|(sample, id)| {
            let (year, month, day) = sample.published;
            NewPost {
                title: sample.title.to_string(),
                slug: None,
                excerpt: sample.excerpt.to_string(),
                content: sample.content.to_string(),
                category: sample.category.to_string(),
                location: Some(sample.location.to_string()),
                cover_image: sample.cover_image.to_string(),
                published_at: Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single(),
                featured: Some(sample.featured),
                read_time: Some(sample.read_time),
                prev_post_id: (id > 1).then(|| id - 1),
                next_post_id: (id < count).then(|| id + 1),
            }
        })
        .collect()
}
