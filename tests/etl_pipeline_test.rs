use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use socialpulse::domain::{EngagementLevel, SentimentLabel};
use socialpulse::pipeline::storage::InMemoryStore;
use socialpulse::{EtlConfig, EtlPipeline};

fn sample_records() -> Vec<serde_json::Value> {
    vec![
        json!({
            "post_id": "ig-1",
            "platform": "instagram",
            "post_text": "Absolutely love this place! &amp; the food is amazing 😍 #foodie #Seattle",
            "hashtags": "Foodie,Seattle",
            "likes": "12,400",
            "comments": 310,
            "image_url": "https://img.example/1.jpg",
            "timestamp": "2024-05-10T18:22:00Z",
            "scraped_at": "2024-05-11T02:00:00Z",
        }),
        json!({
            // No post_id: must be dropped and counted, not raised.
            "platform": "instagram",
            "post_text": "orphan record",
        }),
        json!({
            "post_id": "rd-9",
            "platform": "reddit",
            "post_text": "This update is terrible and broken, what a waste",
            "likes": 4,
            "comments": "2",
            "subreddit": "technology",
            "upvote_ratio": "0.42",
            "timestamp": "yesterday at noon",
        }),
    ]
}

#[tokio::test]
async fn end_to_end_three_records_one_bad() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let mut pipeline = EtlPipeline::new(store.clone(), &EtlConfig::default());

    let summary = pipeline.run(&sample_records()).await?;

    assert_eq!(summary.input_count, 3);
    assert_eq!(summary.transformed_count, 2);
    assert_eq!(summary.loaded_count, 2);
    assert_eq!(summary.transform_stats.errors, 1);
    assert_eq!(summary.transform_stats.processed, 2);
    assert_eq!(store.len(), 2);

    let ig = store.get("ig-1", "instagram").unwrap();
    assert_eq!(ig.likes, 12_400);
    assert_eq!(ig.hashtags, "foodie,seattle");
    assert!(ig.has_media);
    assert_eq!(ig.sentiment_label, SentimentLabel::Positive);
    // Score 12400 + 310*3 = 13330; instagram high starts at 5000, viral at 50000.
    assert_eq!(ig.engagement_level, EngagementLevel::High);
    assert!(!ig.post_text.contains("&amp;"));

    let rd = store.get("rd-9", "reddit").unwrap();
    assert_eq!(rd.sentiment_label, SentimentLabel::Negative);
    assert_eq!(rd.engagement_level, EngagementLevel::Low);
    assert_eq!(rd.upvote_ratio, 0.42);
    // Unparseable timestamp passes through unchanged.
    assert_eq!(rd.timestamp.as_deref(), Some("yesterday at noon"));

    Ok(())
}

#[tokio::test]
async fn rescrape_refreshes_counters_without_rewriting_content() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let mut pipeline = EtlPipeline::new(store.clone(), &EtlConfig::default());

    pipeline
        .run(&[json!({
            "post_id": "tw-5",
            "platform": "twitter",
            "post_text": "original text",
            "likes": 10,
            "scraped_at": "2024-05-01T00:00:00Z",
        })])
        .await?;

    // Second scraping session: counters moved, text edited upstream.
    pipeline
        .run(&[json!({
            "post_id": "tw-5",
            "platform": "twitter",
            "post_text": "edited text",
            "likes": 150,
            "scraped_at": "2024-05-02T00:00:00Z",
        })])
        .await?;

    assert_eq!(store.len(), 1);
    let stored = store.get("tw-5", "twitter").unwrap();
    assert_eq!(stored.likes, 150);
    assert_eq!(stored.scraped_at.as_deref(), Some("2024-05-02T00:00:00Z"));
    assert_eq!(stored.post_text, "original text");

    Ok(())
}

#[tokio::test]
async fn same_post_id_on_two_platforms_stays_distinct() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let mut pipeline = EtlPipeline::new(store.clone(), &EtlConfig::default());

    pipeline
        .run(&[
            json!({"post_id": "123", "platform": "twitter"}),
            json!({"post_id": "123", "platform": "reddit"}),
        ])
        .await?;

    assert_eq!(store.len(), 2);
    Ok(())
}

#[tokio::test]
async fn stats_carry_across_runs_on_one_pipeline() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let mut pipeline = EtlPipeline::new(store, &EtlConfig::default());

    pipeline
        .run(&[json!({"post_id": "a", "platform": "twitter", "post_text": "wonderful"})])
        .await?;
    let summary = pipeline
        .run(&[json!({"post_id": "b", "platform": "twitter", "post_text": "horrible"})])
        .await?;

    assert_eq!(summary.transform_stats.processed, 2);
    assert_eq!(summary.transform_stats.sentiment.positive, 1);
    assert_eq!(summary.transform_stats.sentiment.negative, 1);
    Ok(())
}
