use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Districts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Districts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Districts::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Districts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Districts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::DistrictId).integer().not_null())
                    .col(ColumnDef::new(Sections::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Sections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_district")
                            .from(Sections::Table, Sections::DistrictId)
                            .to(Districts::Table, Districts::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_district_id")
                    .table(Sections::Table)
                    .col(Sections::DistrictId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Churches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Churches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Churches::SectionId).integer().not_null())
                    .col(
                        ColumnDef::new(Churches::ChurchName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Churches::Location).string_len(200))
                    .col(
                        ColumnDef::new(Churches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Churches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_churches_section")
                            .from(Churches::Table, Churches::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_churches_section_id")
                    .table(Churches::Table)
                    .col(Churches::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChurchRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChurchRoles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChurchRoles::RoleName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ChurchRoles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChurchRoles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pastors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pastors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pastors::FullName).string_len(150).not_null())
                    .col(ColumnDef::new(Pastors::Gender).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Pastors::PastorRank)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pastors::NationalId).string_len(30))
                    .col(ColumnDef::new(Pastors::DateOfBirth).date().not_null())
                    .col(
                        ColumnDef::new(Pastors::PhoneNumber)
                            .string_len(13)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pastors::StartOfService).date())
                    .col(ColumnDef::new(Pastors::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Pastors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pastors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChurchPastors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChurchPastors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChurchPastors::ChurchId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChurchPastors::PastorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChurchPastors::RoleId).integer().not_null())
                    .col(
                        ColumnDef::new(ChurchPastors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChurchPastors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_church_pastors_church")
                            .from(ChurchPastors::Table, ChurchPastors::ChurchId)
                            .to(Churches::Table, Churches::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_church_pastors_pastor")
                            .from(ChurchPastors::Table, ChurchPastors::PastorId)
                            .to(Pastors::Table, Pastors::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_church_pastors_role")
                            .from(ChurchPastors::Table, ChurchPastors::RoleId)
                            .to(ChurchRoles::Table, ChurchRoles::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_church_pastors_assignment")
                    .table(ChurchPastors::Table)
                    .col(ChurchPastors::ChurchId)
                    .col(ChurchPastors::PastorId)
                    .col(ChurchPastors::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChurchPastors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pastors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChurchRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Churches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Districts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Districts {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    DistrictId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Churches {
    Table,
    Id,
    SectionId,
    ChurchName,
    Location,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ChurchRoles {
    Table,
    Id,
    RoleName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pastors {
    Table,
    Id,
    FullName,
    Gender,
    PastorRank,
    NationalId,
    DateOfBirth,
    PhoneNumber,
    StartOfService,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ChurchPastors {
    Table,
    Id,
    ChurchId,
    PastorId,
    RoleId,
    CreatedAt,
    UpdatedAt,
}
