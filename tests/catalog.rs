use castgraph::{Actor, ActorId, Catalog, CatalogError, CatalogOptions, Movie, MovieId, Rating};

fn rating(v: u8) -> Rating {
    Rating::new(v).unwrap()
}

fn setup_small_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (id, name, born) in [
        (1, "Mara Quell", 1968),
        (2, "Jonah Pike", 1975),
        (3, "Iris Vane", 1990),
        (4, "Theo Marsh", 1983),
    ] {
        catalog.insert_actor(Actor::new(ActorId(id), name, born));
    }
    for (id, title, year) in [
        (100, "The Long Tide", 1998),
        (101, "Paper Lanterns", 2006),
        (102, "Tide Breakers", 2015),
    ] {
        catalog.insert_movie(Movie::new(MovieId(id), title, year));
    }
    catalog
}

#[test]
fn duplicate_key_insert_updates_payload() {
    let mut catalog = Catalog::new();
    assert!(catalog
        .insert_actor(Actor::new(ActorId(42), "First", 1960))
        .is_none());
    let previous = catalog.insert_actor(Actor::new(ActorId(42), "Second", 1961));
    assert_eq!(previous.map(|a| a.name), Some("First".to_string()));
    assert_eq!(catalog.actor_count(), 1);
    assert_eq!(catalog.actor(ActorId(42)).unwrap().name, "Second");
}

#[test]
fn link_cast_mirrors_both_sides() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    assert!(catalog.link_cast(MovieId(100), ActorId(1))?);
    assert!(catalog.link_cast(MovieId(100), ActorId(2))?);
    assert!(!catalog.link_cast(MovieId(100), ActorId(1))?);

    let cast: Vec<ActorId> = catalog.cast_of(MovieId(100))?.iter().map(|a| a.id).collect();
    assert_eq!(cast, vec![ActorId(1), ActorId(2)]);
    let films: Vec<MovieId> = catalog
        .filmography(ActorId(1))?
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(films, vec![MovieId(100)]);
    Ok(())
}

#[test]
fn link_cast_rejects_missing_records() {
    let mut catalog = setup_small_catalog();
    assert!(matches!(
        catalog.link_cast(MovieId(999), ActorId(1)),
        Err(CatalogError::NotFound { kind: "movie", key: 999 })
    ));
    assert!(matches!(
        catalog.link_cast(MovieId(100), ActorId(999)),
        Err(CatalogError::NotFound { kind: "actor", key: 999 })
    ));
}

#[test]
fn removing_movie_detaches_filmographies() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    catalog.link_cast(MovieId(101), ActorId(3))?;
    catalog.link_cast(MovieId(102), ActorId(3))?;

    let removed = catalog.remove_movie(MovieId(101)).expect("movie existed");
    assert_eq!(removed.title, "Paper Lanterns");
    assert!(catalog.movie(MovieId(101)).is_none());
    let films: Vec<MovieId> = catalog.actor(ActorId(3)).unwrap().movies.iter().copied().collect();
    assert_eq!(films, vec![MovieId(102)]);
    assert!(catalog.remove_movie(MovieId(101)).is_none());
    assert_eq!(catalog.movie_count(), 2);
    Ok(())
}

#[test]
fn removing_actor_detaches_casts() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    catalog.link_cast(MovieId(100), ActorId(1))?;
    catalog.link_cast(MovieId(100), ActorId(4))?;
    assert!(catalog.remove_actor(ActorId(1)).is_some());
    let cast: Vec<ActorId> = catalog.movie(MovieId(100)).unwrap().cast.iter().copied().collect();
    assert_eq!(cast, vec![ActorId(4)]);
    assert!(matches!(
        catalog.filmography(ActorId(1)),
        Err(CatalogError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn rating_range_scenario() -> castgraph::Result<()> {
    let mut catalog = Catalog::new();
    for (id, r) in [(1, 5), (2, 8), (3, 5), (4, 3)] {
        catalog.insert_movie(Movie::new(MovieId(id), format!("Movie {id}"), 2000));
        catalog.rate_movie(MovieId(id), rating(r))?;
    }
    let hits: Vec<(i64, u8)> = catalog
        .movies_in_rating_range(rating(4), rating(8))?
        .iter()
        .map(|m| (m.id.0, m.rating.unwrap().get()))
        .collect();
    assert_eq!(hits, vec![(1, 5), (3, 5), (2, 8)]);

    let all: Vec<u8> = catalog
        .movies_by_rating()
        .iter()
        .map(|m| m.rating.unwrap().get())
        .collect();
    assert_eq!(all, vec![3, 5, 5, 8]);

    assert!(matches!(
        catalog.movies_in_rating_range(rating(8), rating(4)),
        Err(CatalogError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn actor_ratings_are_indexed_separately() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    catalog.rate_actor(ActorId(2), rating(9))?;
    catalog.rate_actor(ActorId(4), rating(2))?;
    let ids: Vec<ActorId> = catalog.actors_by_rating().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![ActorId(4), ActorId(2)]);
    assert!(catalog.movies_by_rating().is_empty());
    let top: Vec<ActorId> = catalog
        .actors_in_rating_range(rating(5), Rating::MAX)?
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(top, vec![ActorId(2)]);
    assert!(catalog.rate_actor(ActorId(77), rating(5)).is_err());
    Ok(())
}

#[test]
fn name_title_and_year_scans() {
    let catalog = setup_small_catalog();
    let mut tides: Vec<i64> = catalog
        .find_movies_by_title("tide")
        .iter()
        .map(|m| m.id.0)
        .collect();
    tides.sort_unstable();
    assert_eq!(tides, vec![100, 102]);

    let actors: Vec<&str> = catalog
        .find_actors_by_name("MAR")
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(actors.len(), 2);
    assert!(actors.contains(&"Mara Quell"));
    assert!(actors.contains(&"Theo Marsh"));

    let mut recent: Vec<i64> = catalog
        .movies_in_year_range(2000, 2020)
        .iter()
        .map(|m| m.id.0)
        .collect();
    recent.sort_unstable();
    assert_eq!(recent, vec![101, 102]);
}

#[test]
fn invalid_options_are_refused() {
    let err = Catalog::with_options(CatalogOptions::default().max_actors(0)).unwrap_err();
    assert!(matches!(err, CatalogError::Config(_)));
}

fn cast_ids(catalog: &Catalog, id: MovieId) -> Vec<i64> {
    catalog.movie(id).unwrap().cast.iter().map(|a| a.0).collect()
}

fn film_ids(catalog: &Catalog, id: ActorId) -> Vec<i64> {
    catalog.actor(id).unwrap().movies.iter().map(|m| m.0).collect()
}

#[test]
fn movie_inserted_with_cast_links_both_sides() {
    let mut catalog = setup_small_catalog();
    catalog.insert_movie(
        Movie::new(MovieId(10), "Salt Road", 2011).with_cast([ActorId(1), ActorId(2)]),
    );
    assert_eq!(cast_ids(&catalog, MovieId(10)), vec![1, 2]);
    assert_eq!(film_ids(&catalog, ActorId(1)), vec![10]);
    assert_eq!(film_ids(&catalog, ActorId(2)), vec![10]);

    assert!(catalog.remove_actor(ActorId(1)).is_some());
    assert_eq!(cast_ids(&catalog, MovieId(10)), vec![2]);
}

#[test]
fn inserted_links_to_absent_records_are_discarded() {
    let mut catalog = setup_small_catalog();
    catalog.insert_movie(
        Movie::new(MovieId(10), "Salt Road", 2011).with_cast([ActorId(1), ActorId(999)]),
    );
    assert_eq!(cast_ids(&catalog, MovieId(10)), vec![1]);

    let mut actor = Actor::new(ActorId(5), "Nell Orr", 1979);
    actor.movies.add(MovieId(10));
    actor.movies.add(MovieId(555));
    catalog.insert_actor(actor);
    assert_eq!(film_ids(&catalog, ActorId(5)), vec![10]);
    assert_eq!(cast_ids(&catalog, MovieId(10)), vec![1, 5]);
}

#[test]
fn actor_upsert_keeps_existing_links() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    catalog.link_cast(MovieId(100), ActorId(1))?;
    catalog.insert_actor(Actor::new(ActorId(1), "Mara Quell-Dunn", 1968));
    assert_eq!(catalog.actor(ActorId(1)).unwrap().name, "Mara Quell-Dunn");
    assert_eq!(film_ids(&catalog, ActorId(1)), vec![100]);

    assert!(catalog.remove_actor(ActorId(1)).is_some());
    assert!(cast_ids(&catalog, MovieId(100)).is_empty());
    Ok(())
}

#[test]
fn movie_upsert_keeps_existing_links() -> castgraph::Result<()> {
    let mut catalog = setup_small_catalog();
    catalog.link_cast(MovieId(101), ActorId(3))?;
    catalog.insert_movie(Movie::new(MovieId(101), "Paper Lanterns", 2007).with_cast([ActorId(4)]));
    assert_eq!(cast_ids(&catalog, MovieId(101)), vec![3, 4]);
    assert_eq!(film_ids(&catalog, ActorId(4)), vec![101]);

    assert!(catalog.remove_movie(MovieId(101)).is_some());
    assert!(film_ids(&catalog, ActorId(3)).is_empty());
    assert!(film_ids(&catalog, ActorId(4)).is_empty());
    Ok(())
}
