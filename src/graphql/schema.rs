use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::mutations::Mutation;
use crate::graphql::queries::Query;

pub type GraphQLSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(context: GraphQLContext) -> GraphQLSchema {
    Schema::build(Query, Mutation::default(), EmptySubscription)
        .data(context)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Identity};
    use crate::database::test_utils::setup_test_db;
    use serde_json::json;

    async fn schema() -> GraphQLSchema {
        build_schema(GraphQLContext::new(setup_test_db().await))
    }

    fn as_user(query: &str) -> Request {
        Request::new(query).data(Identity::User(AuthenticatedUser {
            id: 1,
            username: "chef".into(),
        }))
    }

    #[tokio::test]
    async fn hello_needs_no_identity() {
        let response = schema().await.execute("{ hello }").await;
        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({"hello": "Hello World from GraphQL"})
        );
    }

    #[tokio::test]
    async fn guarded_fields_reject_anonymous_callers() {
        let response = schema()
            .await
            .execute(r#"mutation { createIngredient(name: "Egg") { ingredient { id } } }"#)
            .await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].message,
            "Authentication credentials were not provided"
        );
    }

    #[tokio::test]
    async fn create_then_query_as_user() {
        let schema = schema().await;

        let created = schema
            .execute(as_user(
                r#"mutation { createIngredient(name: "Egg", description: "Hen") { ingredient { id name description } } }"#,
            ))
            .await;
        assert!(created.errors.is_empty(), "{:?}", created.errors);

        let listed = schema
            .execute(as_user(
                "{ ingredients(search: \"EG\") { items { name } page pageSize total numPages } }",
            ))
            .await;
        assert_eq!(
            listed.data.into_json().unwrap(),
            json!({"ingredients": {
                "items": [{"name": "Egg"}],
                "page": 1,
                "pageSize": 10,
                "total": 1,
                "numPages": 1
            }})
        );
    }

    #[tokio::test]
    async fn zero_page_size_is_a_validation_error() {
        let response = schema()
            .await
            .execute(as_user("{ recipes(pageSize: 0) { id } }"))
            .await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code").cloned());
        assert_eq!(code, Some(Value::from("VALIDATION_FAILED")));
    }
}
