use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_auto(Items::Id))
                    .col(string_len(Items::Title, 100))
                    .col(big_integer(Items::Price))
                    .col(boolean(Items::IsActive).default(false))
                    .col(string_len_null(Items::ImagePath, 255))
                    .col(text(Items::Description))
                    .col(string(Items::Category))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::Category)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(string(Orders::ClientNumber))
                    .col(string(Orders::ClientName))
                    .col(string(Orders::ProductTitle))
                    .col(integer_null(Orders::ItemId))
                    .col(string(Orders::OrderStatus).default("unprocessed"))
                    .col(string(Orders::PaymenStatus).default("unpaid"))
                    .col(timestamp_with_time_zone(Orders::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_item_id")
                            .from(Orders::Table, Orders::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Status).default("User"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Title,
    Price,
    IsActive,
    ImagePath,
    Description,
    Category,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    ClientNumber,
    ClientName,
    ProductTitle,
    ItemId,
    OrderStatus,
    PaymenStatus,
    Date,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Status,
}
