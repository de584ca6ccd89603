use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::repository::ProductRepository;

pub struct DeleteProductUseCase<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Soft-delete a live product
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::Sequence;
    use mockall::predicate;

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let mut seq = Sequence::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_delete()
            .with(predicate::eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .with(predicate::eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let use_case = DeleteProductUseCase::new(Arc::new(mock_repo));

        assert!(use_case.execute(id).await.is_ok());
        assert!(matches!(
            use_case.execute(id).await,
            Err(ProductError::NotFound(_))
        ));
    }
}
