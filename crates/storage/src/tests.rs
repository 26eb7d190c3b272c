#[cfg(test)]
mod storage_tests {
    use crate::{Storage, SCHEMA_VERSION};
    use murmur_core::{SchemaConfig, User};
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::with_config(&db_path, SchemaConfig::default()).unwrap();
        (storage, temp_dir)
    }

    fn create_test_user(storage: &Storage, username: &str) -> User {
        storage.create_user(username, Some("test@example.com")).unwrap()
    }

    #[test]
    fn test_fresh_database_is_fully_migrated() {
        let (storage, _temp_dir) = create_test_storage();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);

        let stats = storage.get_stats().unwrap();
        assert_eq!(stats.user_count, 0);
        assert_eq!(stats.post_count, 0);
        assert_eq!(stats.like_count, 0);
        assert_eq!(stats.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let (storage, _temp_dir) = create_test_storage();
        storage.migrate().unwrap();
        storage.migrate().unwrap();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_create_and_get_user() {
        let (storage, _temp_dir) = create_test_storage();
        let user = create_test_user(&storage, "alice");

        let retrieved = storage.get_user(user.id).unwrap().unwrap();
        assert_eq!(retrieved.username, "alice");
        assert_eq!(retrieved.email.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn test_create_and_list_posts() {
        let (storage, _temp_dir) = create_test_storage();
        let user = create_test_user(&storage, "alice");
        let tag = storage.create_tag("happy").unwrap();

        let post = storage
            .create_post(user.id, "first post", None, Some(tag.id))
            .unwrap();
        assert_eq!(post.author, user.id);
        assert_eq!(post.tag, Some(tag.id));

        let posts = storage.get_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].caption, "first post");
    }

    #[test]
    fn test_post_with_zero_likes_is_valid() {
        let (storage, _temp_dir) = create_test_storage();
        let user = create_test_user(&storage, "alice");
        let post = storage.create_post(user.id, "lonely", None, None).unwrap();

        let retrieved = storage.get_post(post.id).unwrap().unwrap();
        assert!(retrieved.likes.is_empty());
        assert_eq!(storage.likes_count(post.id).unwrap(), 0);
    }

    #[test]
    fn test_like_is_a_single_fact() {
        let (storage, _temp_dir) = create_test_storage();
        let alice = create_test_user(&storage, "alice");
        let bob = create_test_user(&storage, "bob");
        let post = storage.create_post(alice.id, "hello", None, None).unwrap();

        assert!(storage.like_post(post.id, bob.id).unwrap());
        // second like of the same pair is ignored, not duplicated
        assert!(!storage.like_post(post.id, bob.id).unwrap());

        assert_eq!(storage.likes_count(post.id).unwrap(), 1);
        assert_eq!(storage.post_likes(post.id).unwrap(), vec![bob.id]);
    }

    #[test]
    fn test_unlike_removes_the_pair() {
        let (storage, _temp_dir) = create_test_storage();
        let alice = create_test_user(&storage, "alice");
        let bob = create_test_user(&storage, "bob");
        let post = storage.create_post(alice.id, "hello", None, None).unwrap();

        storage.like_post(post.id, bob.id).unwrap();
        assert!(storage.unlike_post(post.id, bob.id).unwrap());
        assert!(!storage.unlike_post(post.id, bob.id).unwrap());
        assert_eq!(storage.likes_count(post.id).unwrap(), 0);
    }

    #[test]
    fn test_liked_posts_reverse_accessor() {
        let (storage, _temp_dir) = create_test_storage();
        let alice = create_test_user(&storage, "alice");
        let bob = create_test_user(&storage, "bob");
        let post1 = storage.create_post(alice.id, "one", None, None).unwrap();
        let post2 = storage.create_post(alice.id, "two", None, None).unwrap();
        let post3 = storage.create_post(alice.id, "three", None, None).unwrap();

        storage.like_post(post1.id, bob.id).unwrap();
        storage.like_post(post3.id, bob.id).unwrap();

        let mut liked = storage.liked_posts(bob.id).unwrap();
        liked.sort_unstable();
        assert_eq!(liked, vec![post1.id, post3.id]);
        assert!(storage.liked_posts(alice.id).unwrap().is_empty());
        assert!(!liked.contains(&post2.id));
    }

    #[test]
    fn test_posts_hydrate_their_likers() {
        let (storage, _temp_dir) = create_test_storage();
        let alice = create_test_user(&storage, "alice");
        let bob = create_test_user(&storage, "bob");
        let carol = create_test_user(&storage, "carol");
        let post = storage.create_post(alice.id, "hello", None, None).unwrap();

        storage.like_post(post.id, bob.id).unwrap();
        storage.like_post(post.id, carol.id).unwrap();

        let retrieved = storage.get_post(post.id).unwrap().unwrap();
        let mut likers = retrieved.likes;
        likers.sort_unstable();
        assert_eq!(likers, vec![bob.id, carol.id]);
    }

    #[test]
    fn test_delete_post_removes_likes() {
        let (storage, _temp_dir) = create_test_storage();
        let alice = create_test_user(&storage, "alice");
        let bob = create_test_user(&storage, "bob");
        let post = storage.create_post(alice.id, "hello", None, None).unwrap();
        storage.like_post(post.id, bob.id).unwrap();

        assert!(storage.delete_post(post.id).unwrap());
        assert!(storage.get_post(post.id).unwrap().is_none());
        assert!(storage.liked_posts(bob.id).unwrap().is_empty());

        assert!(!storage.delete_post(post.id).unwrap());
    }

    #[test]
    fn test_rollback_drops_join_table_only() {
        let (storage, _temp_dir) = create_test_storage();

        storage.rollback_to(4).unwrap();
        assert_eq!(storage.schema_version().unwrap(), 4);

        // the v4 single-like relation survives the reversal of v5
        let alice = create_test_user(&storage, "alice");
        let post = storage.create_post(alice.id, "hello", None, None).unwrap();
        assert!(storage.like_post(post.id, alice.id).is_err());

        // re-applying brings the join table back
        storage.migrate().unwrap();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
        assert!(storage.like_post(post.id, alice.id).unwrap());
    }

    #[test]
    fn test_rollback_to_current_is_noop() {
        let (storage, _temp_dir) = create_test_storage();
        storage.rollback_to(SCHEMA_VERSION).unwrap();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_rollback_rejects_negative_target() {
        let (storage, _temp_dir) = create_test_storage();
        assert!(storage.rollback_to(-1).is_err());
    }

    #[test]
    fn test_rollback_to_zero_and_back() {
        let (storage, _temp_dir) = create_test_storage();
        storage.rollback_to(0).unwrap();
        assert_eq!(storage.schema_version().unwrap(), 0);

        storage.migrate().unwrap();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_configured_auth_table_name() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let config = SchemaConfig::with_auth_user_table("accounts").unwrap();
        let storage = Storage::with_config(&db_path, config).unwrap();

        let user = storage.create_user("alice", None).unwrap();
        let post = storage.create_post(user.id, "hello", None, None).unwrap();
        assert!(storage.like_post(post.id, user.id).unwrap());
        assert_eq!(storage.get_users().unwrap().len(), 1);
    }
}
