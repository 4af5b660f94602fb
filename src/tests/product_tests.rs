use crate::core::errors::StorefrontError;
use crate::core::models::page::{PageRequest, ProductSortField, Sort, SortDirection};
use crate::core::models::product::Product;
use crate::core::services::ProductService;
use crate::infrastructure::storage::ProductStore;
use crate::tests::{FailingCache, RecordingStore, create_test_product_service, draft, init_logging};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::test]
async fn test_widget_lifecycle() {
    let (service, _, _) = create_test_product_service();

    let widget = service.create(draft("Widget", "9.99")).await.unwrap();
    assert!(widget.is_active);
    assert_eq!(widget.price, "9.99".parse::<Decimal>().unwrap());

    let listed = service.list_active().await.unwrap();
    assert!(listed.iter().any(|p| p.id == widget.id));

    service.delete(widget.id).await.unwrap();

    let result = service.get(widget.id).await;
    assert!(matches!(result, Err(StorefrontError::NotFound { .. })));
    let listed = service.list_active().await.unwrap();
    assert!(listed.iter().all(|p| p.id != widget.id));
}

#[tokio::test]
async fn test_create_trims_name_and_keeps_description() {
    let (service, _, _) = create_test_product_service();
    let mut input = draft("  Lamp  ", "25.00");
    input.description = Some("Desk lamp".to_string());

    let created = service.create(input).await.unwrap();
    assert_eq!(created.name, "Lamp");
    assert_eq!(created.description.as_deref(), Some("Desk lamp"));
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_invalid_input_without_writing() {
    let (service, storage, _) = create_test_product_service();

    for (name, price, field) in [("Widget", "0", "price"), ("Widget", "-1.50", "price"), ("   ", "5", "name")] {
        let result = service.create(draft(name, price)).await;
        match result {
            Err(StorefrontError::InvalidInput(f, _)) => assert_eq!(f, field),
            other => panic!("expected invalid {}, got {:?}", field, other),
        }
    }

    let long_name = "x".repeat(256);
    assert!(matches!(
        service.create(draft(&long_name, "1")).await,
        Err(StorefrontError::InvalidInput(..))
    ));
    assert_eq!(storage.product_saves(), 0);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let (service, _, _) = create_test_product_service();
    let created = service.create(draft("Mug", "4.50")).await.unwrap();

    let updated = service.update(created.id, draft("Big Mug", "6.00")).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Big Mug");
    assert_eq!(updated.price, "6.00".parse::<Decimal>().unwrap());
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_or_deleted_product_is_not_found() {
    let (service, storage, _) = create_test_product_service();

    let result = service.update(Uuid::now_v7(), draft("Ghost", "1")).await;
    assert!(matches!(result, Err(StorefrontError::NotFound { .. })));

    let created = service.create(draft("Mug", "4.50")).await.unwrap();
    service.delete(created.id).await.unwrap();
    let result = service.update(created.id, draft("Mug", "5")).await;
    assert!(matches!(result, Err(StorefrontError::NotFound { .. })));
    assert_eq!(storage.product_saves(), 2);
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let (service, _, _) = create_test_product_service();
    let result = service.update(Uuid::now_v7(), draft("Ghost", "0")).await;
    assert!(matches!(result, Err(StorefrontError::InvalidInput(..))));
}

#[tokio::test]
async fn test_delete_is_soft_and_not_repeatable() {
    let (service, storage, _) = create_test_product_service();
    let created = service.create(draft("Chair", "49.00")).await.unwrap();

    service.delete(created.id).await.unwrap();
    let row = storage.find_by_id(created.id).await.unwrap().unwrap();
    assert!(!row.is_active);
    assert_eq!(row.name, "Chair");

    let again = service.delete(created.id).await;
    assert!(matches!(again, Err(StorefrontError::NotFound { .. })));
    let missing = service.delete(Uuid::now_v7()).await;
    assert!(matches!(missing, Err(StorefrontError::NotFound { .. })));
    // one for create, one for the first delete
    assert_eq!(storage.product_saves(), 2);
}

#[tokio::test]
async fn test_list_active_is_served_from_cache_until_a_mutation() {
    let (service, storage, _) = create_test_product_service();
    service.create(draft("First", "1")).await.unwrap();
    assert_eq!(service.list_active().await.unwrap().len(), 1);

    // A row written behind the service's back is invisible while cached
    storage
        .inner
        .save_product(Product::new(draft("Backdoor", "2")))
        .await
        .unwrap();
    assert_eq!(service.list_active().await.unwrap().len(), 1);

    service.create(draft("Second", "3")).await.unwrap();
    let names: Vec<String> = service
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["First", "Backdoor", "Second"]);
}

#[tokio::test]
async fn test_get_after_update_never_returns_stale_entry() {
    let (service, _, cache) = create_test_product_service();
    let created = service.create(draft("Desk", "100")).await.unwrap();

    assert_eq!(service.get(created.id).await.unwrap().name, "Desk");
    assert!(!cache.is_empty().await);

    service.update(created.id, draft("Standing Desk", "250")).await.unwrap();
    assert!(cache.is_empty().await);
    assert_eq!(service.get(created.id).await.unwrap().name, "Standing Desk");
}

#[tokio::test]
async fn test_not_found_is_not_cached() {
    let (service, _, cache) = create_test_product_service();
    let result = service.get(Uuid::now_v7()).await;
    assert!(matches!(result, Err(StorefrontError::NotFound { .. })));
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_failing_cache_never_fails_the_catalogue() {
    init_logging();
    let storage = RecordingStore::default();
    let service = ProductService::new(storage.clone(), FailingCache);

    let created = service.create(draft("Widget", "9.99")).await.unwrap();
    assert_eq!(service.get(created.id).await.unwrap().id, created.id);
    assert_eq!(service.list_active().await.unwrap().len(), 1);

    service.update(created.id, draft("Widget 2", "10.99")).await.unwrap();
    service.delete(created.id).await.unwrap();
    assert!(service.list_active().await.unwrap().is_empty());
    assert_eq!(storage.product_saves(), 3);

    assert!(service.ping_storage().await.is_ok());
    assert!(service.ping_cache().await.is_err());
}

#[tokio::test]
async fn test_pagination_reports_totals_and_order() {
    let (service, _, _) = create_test_product_service();
    for (name, price) in [("a", "5"), ("b", "1"), ("c", "4"), ("d", "2"), ("e", "3")] {
        service.create(draft(name, price)).await.unwrap();
    }
    let deleted = service.create(draft("gone", "9")).await.unwrap();
    service.delete(deleted.id).await.unwrap();

    let by_price_desc = Sort {
        field: ProductSortField::Price,
        direction: SortDirection::Desc,
    };
    let first = service
        .list_active_paginated(PageRequest::new(0, 2, by_price_desc).unwrap())
        .await
        .unwrap();
    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    let names: Vec<&str> = first.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);

    let last = service
        .list_active_paginated(PageRequest::new(2, 2, by_price_desc).unwrap())
        .await
        .unwrap();
    assert_eq!(last.content.len(), 1);
    assert_eq!(last.content[0].name, "b");
    assert_eq!(last.number, 2);

    let beyond = service
        .list_active_paginated(PageRequest::new(7, 2, Sort::default()).unwrap())
        .await
        .unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.total_elements, 5);
}

#[tokio::test]
async fn test_search_and_price_range() {
    let (service, _, _) = create_test_product_service();
    service.create(draft("Red Widget", "5")).await.unwrap();
    service.create(draft("Blue widget", "15")).await.unwrap();
    service.create(draft("Gadget", "10")).await.unwrap();

    let found = service.search_by_name("WIDGET").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(matches!(
        service.search_by_name("  ").await,
        Err(StorefrontError::Validation(_))
    ));

    let ranged = service
        .list_by_price_range("5".parse().unwrap(), "10".parse().unwrap())
        .await
        .unwrap();
    let names: Vec<&str> = ranged.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Red Widget", "Gadget"]);

    assert!(matches!(
        service
            .list_by_price_range("10".parse().unwrap(), "5".parse().unwrap())
            .await,
        Err(StorefrontError::Validation(_))
    ));
    assert!(matches!(
        service
            .list_by_price_range("-1".parse().unwrap(), "5".parse().unwrap())
            .await,
        Err(StorefrontError::Validation(_))
    ));
}

#[tokio::test]
async fn test_zero_size_literal_request_is_a_validation_error() {
    let (service, _, _) = create_test_product_service();
    service.create(draft("Widget", "9.99")).await.unwrap();

    let request = PageRequest {
        page: 0,
        size: 0,
        sort: Sort::default(),
    };
    let result = service.list_active_paginated(request).await;
    assert!(matches!(result, Err(StorefrontError::Validation(_))));
}
