use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::{AppError, AppResult},
    utils::slug::generate_slug,
};

use super::{
    Article, ArticleFilter, ArticleId, ArticleRepository, Comment, CommentFilter, CommentId,
    CommentRepository, CreateArticleInput, CreateCommentInput, CreateUserInput,
    FavoriteRepository, FollowerRepository, TagRepository, UnitOfWork, UnitOfWorkContext,
    UpdateArticleInput, UpdateUserInput, User, UserId, UserRepository,
};

type TagId = i64;

#[derive(Clone, Debug, Default)]
struct State {
    last_user_id: UserId,
    last_article_id: ArticleId,
    last_comment_id: CommentId,
    last_tag_id: TagId,
    users: BTreeMap<UserId, User>,
    // (follower, followed)
    followers: HashSet<(UserId, UserId)>,
    articles: BTreeMap<ArticleId, Article>,
    tags: BTreeMap<TagId, String>,
    article_tags: HashSet<(ArticleId, TagId)>,
    // (user, article)
    favorites: HashSet<(UserId, ArticleId)>,
    comments: BTreeMap<CommentId, Comment>,
}

impl State {
    fn tag_names(&self, article_id: ArticleId) -> Vec<String> {
        let mut names: Vec<String> = self
            .article_tags
            .iter()
            .filter(|(id, _)| *id == article_id)
            .filter_map(|(_, tag_id)| self.tags.get(tag_id).cloned())
            .collect();
        names.sort();
        names
    }

    fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    fn check_user_uniqueness(
        &self,
        id: Option<UserId>,
        username: &str,
        email: &str,
    ) -> AppResult<()> {
        let others = self.users.values().filter(|user| Some(user.id) != id);
        for user in others {
            if user.username == username {
                return Err(AppError::UsernameAlreadyExists);
            }
            if user.email == email {
                return Err(AppError::EmailAlreadyExists);
            }
        }
        Ok(())
    }

    fn check_slug_uniqueness(&self, id: Option<ArticleId>, slug: &str) -> AppResult<()> {
        let taken = self
            .articles
            .values()
            .any(|article| Some(article.id) != id && article.slug == slug);
        if taken {
            Err(anyhow::anyhow!("article slug is already taken: {slug}").into())
        } else {
            Ok(())
        }
    }

    fn matches(&self, article: &Article, filter: &ArticleFilter) -> bool {
        if let Some(tag) = &filter.tag {
            let tagged = self.article_tags.iter().any(|(article_id, tag_id)| {
                *article_id == article.id && self.tags.get(tag_id) == Some(tag)
            });
            if !tagged {
                return false;
            }
        }
        if let Some(author) = &filter.author {
            match self.users.get(&article.author_id) {
                Some(user) if &user.username == author => {}
                _ => return false,
            }
        }
        if let Some(favorite_of) = &filter.favorite_of {
            match self.user_by_username(favorite_of) {
                Some(user) if self.favorites.contains(&(user.id, article.id)) => {}
                _ => return false,
            }
        }
        if let Some(feed_of) = filter.feed_of {
            if !self.followers.contains(&(feed_of, article.author_id)) {
                return false;
            }
        }
        true
    }

    fn filtered(&self, filter: &ArticleFilter) -> Vec<&Article> {
        let mut articles: Vec<&Article> = self
            .articles
            .values()
            .filter(|article| self.matches(article, filter))
            .collect();
        articles.sort_by_key(|article| (article.created_at, article.id));
        articles
    }

    fn favorite_count(&self, article_id: ArticleId) -> i64 {
        self.favorites
            .iter()
            .filter(|(_, id)| *id == article_id)
            .count() as i64
    }
}

/// Process-local storage for tests and demos.
///
/// A scope holds the lock on the shared state from `begin` until it is
/// committed or dropped, so scopes run one after another. Writes go to a
/// private copy that `commit` publishes.
#[derive(Clone, Default)]
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<State>>,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    type Context = MemoryUnitOfWorkContext;

    async fn begin(&self) -> AppResult<Self::Context> {
        let shared = Arc::clone(&self.state).lock_owned().await;
        let state = State::clone(&shared);
        Ok(MemoryUnitOfWorkContext { shared, state })
    }
}

pub struct MemoryUnitOfWorkContext {
    shared: OwnedMutexGuard<State>,
    state: State,
}

#[async_trait]
impl UnitOfWorkContext for MemoryUnitOfWorkContext {
    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn followers(&mut self) -> &mut dyn FollowerRepository {
        self
    }

    fn articles(&mut self) -> &mut dyn ArticleRepository {
        self
    }

    fn tags(&mut self) -> &mut dyn TagRepository {
        self
    }

    fn favorites(&mut self) -> &mut dyn FavoriteRepository {
        self
    }

    fn comments(&mut self) -> &mut dyn CommentRepository {
        self
    }

    async fn commit(self) -> AppResult<()> {
        let Self { mut shared, state } = self;
        *shared = state;
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl UserRepository for MemoryUnitOfWorkContext {
    async fn create(&mut self, input: CreateUserInput) -> AppResult<User> {
        let state = &mut self.state;
        state.check_user_uniqueness(None, &input.username, &input.email)?;

        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            bio: String::new(),
            image: None,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .state
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn get_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        Ok(self.state.user_by_username(username).cloned())
    }

    async fn get_by_id(&mut self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.users.get(&id).cloned())
    }

    async fn get_by_ids(&mut self, ids: &[UserId]) -> AppResult<HashMap<UserId, User>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.state.users.get(id))
            .map(|user| (user.id, user.clone()))
            .collect())
    }

    async fn update(&mut self, id: UserId, input: UpdateUserInput) -> AppResult<Option<User>> {
        let Some(mut user) = self.state.users.get(&id).cloned() else {
            return Ok(None);
        };

        input.username.apply_to(&mut user.username);
        input.email.apply_to(&mut user.email);
        input.password_hash.apply_to(&mut user.password_hash);
        input.bio.apply_to(&mut user.bio);
        input.image.apply_to(&mut user.image);

        self.state
            .check_user_uniqueness(Some(id), &user.username, &user.email)?;
        self.state.users.insert(id, user.clone());
        Ok(Some(user))
    }
}

#[async_trait]
impl FollowerRepository for MemoryUnitOfWorkContext {
    async fn follow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()> {
        self.state.followers.insert((follower_id, followed_id));
        Ok(())
    }

    async fn unfollow(&mut self, follower_id: UserId, followed_id: UserId) -> AppResult<()> {
        self.state.followers.remove(&(follower_id, followed_id));
        Ok(())
    }

    async fn is_followed(&mut self, id: UserId, by: UserId) -> AppResult<bool> {
        Ok(self.state.followers.contains(&(by, id)))
    }

    async fn are_followed(
        &mut self,
        ids: &[UserId],
        by: UserId,
    ) -> AppResult<HashMap<UserId, bool>> {
        Ok(ids
            .iter()
            .map(|id| (*id, self.state.followers.contains(&(by, *id))))
            .collect())
    }
}

#[async_trait]
impl ArticleRepository for MemoryUnitOfWorkContext {
    async fn create(&mut self, input: CreateArticleInput) -> AppResult<Article> {
        let state = &mut self.state;
        let slug = generate_slug(&input.title);
        state.check_slug_uniqueness(None, &slug)?;

        state.last_article_id += 1;
        let article = Article {
            id: state.last_article_id,
            author_id: input.author_id,
            slug,
            title: input.title,
            description: input.description,
            body: input.body,
            created_at: now(),
            updated_at: None,
        };
        state.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn get_many(
        &mut self,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Article>> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self
            .state
            .filtered(filter)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&mut self, filter: &ArticleFilter) -> AppResult<i64> {
        Ok(self.state.filtered(filter).len() as i64)
    }

    async fn get_by_slug(&mut self, slug: &str) -> AppResult<Option<Article>> {
        Ok(self
            .state
            .articles
            .values()
            .find(|article| article.slug == slug)
            .cloned())
    }

    async fn update(
        &mut self,
        id: ArticleId,
        input: UpdateArticleInput,
    ) -> AppResult<Option<Article>> {
        let Some(mut article) = self.state.articles.get(&id).cloned() else {
            return Ok(None);
        };

        if let Some(title) = input.title.into_option() {
            article.slug = generate_slug(&title);
            article.title = title;
            self.state.check_slug_uniqueness(Some(id), &article.slug)?;
        }
        input.description.apply_to(&mut article.description);
        input.body.apply_to(&mut article.body);
        article.updated_at = Some(now());

        self.state.articles.insert(id, article.clone());
        Ok(Some(article))
    }

    async fn delete(&mut self, id: ArticleId) -> AppResult<Option<ArticleId>> {
        let state = &mut self.state;
        state.article_tags.retain(|(article_id, _)| *article_id != id);
        state.favorites.retain(|(_, article_id)| *article_id != id);
        state.comments.retain(|_, comment| comment.article_id != id);
        Ok(state.articles.remove(&id).map(|article| article.id))
    }
}

#[async_trait]
impl TagRepository for MemoryUnitOfWorkContext {
    async fn create(&mut self, article_id: ArticleId, tags: &[String]) -> AppResult<()> {
        let state = &mut self.state;
        for tag in tags {
            let existing = state
                .tags
                .iter()
                .find(|(_, name)| *name == tag)
                .map(|(id, _)| *id);
            let tag_id = match existing {
                Some(id) => id,
                None => {
                    state.last_tag_id += 1;
                    state.tags.insert(state.last_tag_id, tag.clone());
                    state.last_tag_id
                }
            };
            state.article_tags.insert((article_id, tag_id));
        }
        Ok(())
    }

    async fn get_all(&mut self) -> AppResult<Vec<String>> {
        Ok(self.state.tags.values().cloned().collect())
    }

    async fn get_for_article(&mut self, article_id: ArticleId) -> AppResult<Vec<String>> {
        Ok(self.state.tag_names(article_id))
    }

    async fn get_for_articles(
        &mut self,
        article_ids: &[ArticleId],
    ) -> AppResult<HashMap<ArticleId, Vec<String>>> {
        Ok(article_ids
            .iter()
            .map(|id| (*id, self.state.tag_names(*id)))
            .filter(|(_, tags)| !tags.is_empty())
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryUnitOfWorkContext {
    async fn add(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64> {
        self.state.favorites.insert((user_id, article_id));
        Ok(self.state.favorite_count(article_id))
    }

    async fn remove(&mut self, user_id: UserId, article_id: ArticleId) -> AppResult<i64> {
        self.state.favorites.remove(&(user_id, article_id));
        Ok(self.state.favorite_count(article_id))
    }

    async fn is_favorite(&mut self, article_id: ArticleId, of: UserId) -> AppResult<bool> {
        Ok(self.state.favorites.contains(&(of, article_id)))
    }

    async fn are_favorite(
        &mut self,
        article_ids: &[ArticleId],
        of: UserId,
    ) -> AppResult<HashMap<ArticleId, bool>> {
        Ok(article_ids
            .iter()
            .map(|id| (*id, self.state.favorites.contains(&(of, *id))))
            .collect())
    }

    async fn count(&mut self, article_id: ArticleId) -> AppResult<i64> {
        Ok(self.state.favorite_count(article_id))
    }

    async fn count_many(
        &mut self,
        article_ids: &[ArticleId],
    ) -> AppResult<HashMap<ArticleId, i64>> {
        Ok(article_ids
            .iter()
            .map(|id| (*id, self.state.favorite_count(*id)))
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}

#[async_trait]
impl CommentRepository for MemoryUnitOfWorkContext {
    async fn create(&mut self, input: CreateCommentInput) -> AppResult<Comment> {
        let state = &mut self.state;
        state.last_comment_id += 1;
        let comment = Comment {
            id: state.last_comment_id,
            author_id: input.author_id,
            article_id: input.article_id,
            created_at: now(),
            updated_at: None,
            body: input.body,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn get_many(&mut self, filter: &CommentFilter) -> AppResult<Vec<Comment>> {
        Ok(self
            .state
            .comments
            .values()
            .filter(|comment| {
                filter
                    .article_id
                    .map_or(true, |article_id| comment.article_id == article_id)
            })
            .cloned()
            .collect())
    }

    async fn get_by_id(&mut self, id: CommentId) -> AppResult<Option<Comment>> {
        Ok(self.state.comments.get(&id).cloned())
    }

    async fn delete(&mut self, id: CommentId) -> AppResult<Option<CommentId>> {
        Ok(self.state.comments.remove(&id).map(|comment| comment.id))
    }
}
