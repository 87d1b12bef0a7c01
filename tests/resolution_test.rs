//! Identity resolution against mocked catalogs.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::*;
use magnetarr::metadata::RemoteIdMatch;
use magnetarr::Error;
use magnetarr_common::{Item, ItemType, ProviderKind};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHAWSHANK: &str = "https://www.imdb.com/title/tt0111161/";
const OZ_IMDB: &str = "https://www.imdb.com/title/tt0118421/?ref_=fn_al_tt_1";

async fn resolve(server: &MockServer, url: &str) -> Option<Item> {
    let providers = providers(server);
    let provider = providers.resolve(url)?;
    Some(provider.item_from_url(url).await)
}

#[tokio::test]
async fn unsupported_urls_resolve_to_none() {
    let server = MockServer::start().await;
    for url in [
        "https://www.rottentomatoes.com/m/shawshank_redemption",
        "https://www.imdb.com/chart/top/",
        "https://thetvdb.com/",
        "ftp://themoviedb.org/collection/1",
    ] {
        assert!(resolve(&server, url).await.is_none(), "{url}");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn imdb_series_via_remote_id_search() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0111161"))
        .and(header("authorization", format!("Bearer {TVDB_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{ "series": { "id": "79488" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = resolve(&server, SHAWSHANK).await.unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0111161"));
    assert_eq!(item.tvdb_id.as_deref(), Some("79488"));
    assert_eq!(item.provider, Some(ProviderKind::Imdb));
}

#[tokio::test]
async fn imdb_movie_via_remote_id_search() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0111161"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "movie": { "id": 190 } }]
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, SHAWSHANK).await.unwrap();
    assert_eq!(item.item_type, ItemType::Movie);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0111161"));
    assert_eq!(item.tvdb_id.as_deref(), Some("190"));
}

#[tokio::test]
async fn imdb_falls_back_to_legacy_xml() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0111161"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/legacy/GetSeriesByRemoteID.php"))
        .and(query_param("imdbid", "tt0111161"))
        .respond_with(ResponseTemplate::new(200).set_body_string(legacy_series_xml("79488")))
        .expect(1)
        .mount(&server)
        .await;

    let item = resolve(&server, SHAWSHANK).await.unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0111161"));
    assert_eq!(item.tvdb_id.as_deref(), Some("79488"));
}

#[tokio::test]
async fn imdb_empty_search_falls_back_to_legacy_xml() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0118421"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/legacy/GetSeriesByRemoteID.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(legacy_series_xml("70682")))
        .mount(&server)
        .await;

    let item = resolve(&server, OZ_IMDB).await.unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0118421"));
    assert_eq!(item.tvdb_id.as_deref(), Some("70682"));
}

#[tokio::test]
async fn imdb_defaults_to_movie_when_every_tier_fails() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0111161"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/legacy/GetSeriesByRemoteID.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Data></Data>"))
        .mount(&server)
        .await;

    let item = resolve(&server, SHAWSHANK).await.unwrap();
    assert_eq!(item.item_type, ItemType::Movie);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0111161"));
    assert!(item.tvdb_id.is_none());
    assert!(item.is_resolved());
}

#[tokio::test]
async fn imdb_defaults_to_movie_when_login_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let item = resolve(&server, SHAWSHANK).await.unwrap();
    assert_eq!(item, Item::new(ItemType::Movie, Some("tt0111161".into()), None).with_provider(ProviderKind::Imdb));
}

#[tokio::test]
async fn tvdb_slug_with_imdb_cross_reference() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/series/slug/oz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 70682, "name": "Oz", "slug": "oz" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/series/70682/extended"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 70682,
                "remoteIds": [
                    { "id": "EP00188392", "type": 11, "sourceName": "TV.com" },
                    { "id": "tt0118421", "type": 2, "sourceName": "IMDB" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, "https://thetvdb.com/series/oz").await.unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert_eq!(item.imdb_id.as_deref(), Some("tt0118421"));
    assert_eq!(item.tvdb_id.as_deref(), Some("70682"));
    assert_eq!(item.provider, Some(ProviderKind::Tvdb));
}

#[tokio::test]
async fn tvdb_slug_without_extended_record_keeps_native_id() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/movies/slug/dune-part-two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "356945" }
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, "https://thetvdb.com/movies/dune-part-two#artwork")
        .await
        .unwrap();
    assert_eq!(item.item_type, ItemType::Movie);
    assert!(item.imdb_id.is_none());
    assert_eq!(item.tvdb_id.as_deref(), Some("356945"));
    assert!(item.is_resolved());
}

#[tokio::test]
async fn tvdb_unknown_slug_is_unresolved() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;

    let item = resolve(&server, "https://thetvdb.com/series/does-not-exist")
        .await
        .unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert!(!item.is_resolved());
}

#[tokio::test]
async fn tmdb_external_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tmdb/tv/1402/external_ids"))
        .and(header("authorization", format!("Bearer {TMDB_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1402,
            "imdb_id": "tt1520211",
            "tvdb_id": 153021,
            "facebook_id": "TheWalkingDead"
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, "https://www.themoviedb.org/tv/1402-the-walking-dead")
        .await
        .unwrap();
    assert_eq!(item.item_type, ItemType::Series);
    assert_eq!(item.imdb_id.as_deref(), Some("tt1520211"));
    assert_eq!(item.tvdb_id.as_deref(), Some("153021"));
    assert_eq!(item.provider, Some(ProviderKind::TheMovieDb));
}

#[tokio::test]
async fn tmdb_movie_without_tvdb_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tmdb/movie/693134/external_ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 693134,
            "imdb_id": "tt15239678",
            "wikidata_id": "Q104815767"
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, "https://www.themoviedb.org/movie/693134-dune-part-two")
        .await
        .unwrap();
    assert_eq!(item.item_type, ItemType::Movie);
    assert_eq!(item.imdb_id.as_deref(), Some("tt15239678"));
    assert!(item.tvdb_id.is_none());
}

#[tokio::test]
async fn tmdb_failure_is_unresolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tmdb/movie/1/external_ids"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    let item = resolve(&server, "https://www.themoviedb.org/movie/1").await.unwrap();
    assert!(!item.is_resolved());
}

#[tokio::test]
async fn concurrent_requests_share_one_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "token": TVDB_TOKEN } }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/remoteid/tt0111161"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "series": { "id": 79488 } }]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let catalogs = catalogs(&server);
    let (a, b, c) = tokio::join!(
        catalogs.tvdb.search_remote_id("tt0111161"),
        catalogs.tvdb.search_remote_id("tt0111161"),
        catalogs.tvdb.search_remote_id("tt0111161"),
    );

    let expected = RemoteIdMatch {
        item_type: ItemType::Series,
        tvdb_id: "79488".into(),
    };
    for result in [a, b, c] {
        assert_eq!(result.unwrap(), Some(expected.clone()));
    }
}

#[tokio::test]
async fn catalog_errors_propagate_from_the_client() {
    let server = MockServer::start().await;
    mount_tvdb_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/series/slug/oz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/legacy/GetSeriesByRemoteID.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Data><Series></Data><seriesid>1</seriesid>"))
        .mount(&server)
        .await;

    let catalogs = catalogs(&server);
    assert_matches!(
        catalogs.tvdb.id_from_slug(ItemType::Series, "oz").await,
        Err(Error::Parse(_))
    );
    assert_matches!(
        catalogs.tvdb.legacy_series_id("tt0118421").await,
        Err(Error::Parse(_))
    );
    assert_matches!(
        catalogs.tvdb.id_from_slug(ItemType::Movie, "oz").await,
        Err(Error::HttpStatus { status: 404, .. })
    );
}
