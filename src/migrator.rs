use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_productos_table::Migration),
            Box::new(m20240101_000002_create_proveedores_table::Migration),
            Box::new(m20240101_000003_create_beneficiarios_table::Migration),
            Box::new(m20240101_000004_create_usuarios_tables::Migration),
            Box::new(m20240101_000005_create_cuadre_inventario_table::Migration),
            Box::new(m20240101_000006_create_ordenes_abastecimiento_tables::Migration),
            Box::new(m20240101_000007_create_ordenes_compra_tables::Migration),
            Box::new(m20240101_000008_create_ordenes_salida_tables::Migration),
            Box::new(m20240101_000009_create_movimientos_inventario_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_productos_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_productos_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Productos::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Productos::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Productos::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Productos::Name).string().not_null())
                        .col(ColumnDef::new(Productos::Description).string().null())
                        .col(
                            ColumnDef::new(Productos::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Productos::Unit).string().null())
                        .col(
                            ColumnDef::new(Productos::MinStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Productos::Category).string().null())
                        .col(
                            ColumnDef::new(Productos::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Productos::ExpiresAt).date().null())
                        .col(ColumnDef::new(Productos::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Productos::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Productos {
        Table,
        Id,
        Code,
        Name,
        Description,
        Quantity,
        Unit,
        MinStock,
        Category,
        UnitPrice,
        ExpiresAt,
        CreatedAt,
    }
}

mod m20240101_000002_create_proveedores_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_proveedores_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Proveedores::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Proveedores::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Proveedores::Ruc)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Proveedores::Name).string().not_null())
                        .col(ColumnDef::new(Proveedores::Address).string().null())
                        .col(ColumnDef::new(Proveedores::Phone).string().null())
                        .col(ColumnDef::new(Proveedores::Email).string().null())
                        .col(
                            ColumnDef::new(Proveedores::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Proveedores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Proveedores {
        Table,
        Id,
        Ruc,
        Name,
        Address,
        Phone,
        Email,
        CreatedAt,
    }
}

mod m20240101_000003_create_beneficiarios_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_beneficiarios_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Beneficiarios::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Beneficiarios::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Beneficiarios::Dni)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Beneficiarios::FirstNames)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Beneficiarios::LastNames).string().null())
                        .col(ColumnDef::new(Beneficiarios::Phone).string().null())
                        .col(ColumnDef::new(Beneficiarios::Address).string().null())
                        .col(
                            ColumnDef::new(Beneficiarios::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Beneficiarios::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Beneficiarios::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Beneficiarios {
        Table,
        Id,
        Dni,
        FirstNames,
        LastNames,
        Phone,
        Address,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_usuarios_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_usuarios_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Usuarios::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Usuarios::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Usuarios::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Usuarios::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Usuarios::FirstName).string().not_null())
                        .col(ColumnDef::new(Usuarios::LastName).string().not_null())
                        .col(ColumnDef::new(Usuarios::Email).string().null())
                        .col(
                            ColumnDef::new(Usuarios::Enabled)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Usuarios::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Roles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Roles::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Roles::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Roles::Description).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UsuariosRoles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UsuariosRoles::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UsuariosRoles::RoleId)
                                .big_integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(UsuariosRoles::UserId)
                                .col(UsuariosRoles::RoleId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UsuariosRoles::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Roles::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Usuarios::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Usuarios {
        Table,
        Id,
        Username,
        PasswordHash,
        FirstName,
        LastName,
        Email,
        Enabled,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Roles {
        Table,
        Id,
        Name,
        Description,
    }

    #[derive(DeriveIden)]
    enum UsuariosRoles {
        Table,
        UserId,
        RoleId,
    }
}

mod m20240101_000005_create_cuadre_inventario_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_cuadre_inventario_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CuadreInventario::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CuadreInventario::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CuadreInventario::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CuadreInventario::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CuadreInventario::Action).string().not_null())
                        .col(ColumnDef::new(CuadreInventario::Status).string().not_null())
                        .col(ColumnDef::new(CuadreInventario::ExpiresAt).date().null())
                        .col(ColumnDef::new(CuadreInventario::Notes).string().null())
                        .col(
                            ColumnDef::new(CuadreInventario::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CuadreInventario::ConfirmedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CuadreInventario::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CuadreInventario {
        Table,
        Id,
        ProductId,
        Quantity,
        Action,
        Status,
        ExpiresAt,
        Notes,
        CreatedAt,
        ConfirmedAt,
    }
}

mod m20240101_000006_create_ordenes_abastecimiento_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_ordenes_abastecimiento_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrdenesAbastecimiento::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::DocumentNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::OrderDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::Kind)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::SupplierId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::Total)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(OrdenesAbastecimiento::Notes).string().null())
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesAbastecimiento::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrdenAbastecimientoItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::OrderId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::Subtotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenAbastecimientoItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(OrdenAbastecimientoItems::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(OrdenesAbastecimiento::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrdenesAbastecimiento {
        Table,
        Id,
        DocumentNumber,
        OrderDate,
        Kind,
        SupplierId,
        UserId,
        Status,
        Total,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrdenAbastecimientoItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
        Subtotal,
        CreatedAt,
    }
}

mod m20240101_000007_create_ordenes_compra_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_ordenes_compra_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrdenesCompra::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenesCompra::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenesCompra::DocumentNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(OrdenesCompra::OrderDate).date().not_null())
                        .col(ColumnDef::new(OrdenesCompra::Kind).string().not_null())
                        .col(
                            ColumnDef::new(OrdenesCompra::SupplierId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesCompra::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdenesCompra::Status).string().not_null())
                        .col(
                            ColumnDef::new(OrdenesCompra::Total)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(OrdenesCompra::Notes).string().null())
                        .col(
                            ColumnDef::new(OrdenesCompra::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdenesCompra::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrdenCompraItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenCompraItems::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::OrderId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::Subtotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenCompraItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrdenCompraItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrdenesCompra::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrdenesCompra {
        Table,
        Id,
        DocumentNumber,
        OrderDate,
        Kind,
        SupplierId,
        UserId,
        Status,
        Total,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrdenCompraItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
        Subtotal,
        CreatedAt,
    }
}

mod m20240101_000008_create_ordenes_salida_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_ordenes_salida_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrdenesSalida::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenesSalida::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::DispatchNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::TramiteNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::DispatchDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::BeneficiaryDni)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::BeneficiaryName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::BeneficiaryId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenesSalida::DeliveredCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(OrdenesSalida::Description).string().null())
                        .col(
                            ColumnDef::new(OrdenesSalida::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdenesSalida::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrdenSalidaItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdenSalidaItems::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::OrderId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::Subtotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdenSalidaItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrdenSalidaItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrdenesSalida::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrdenesSalida {
        Table,
        Id,
        OrderNumber,
        DispatchNumber,
        TramiteNumber,
        DispatchDate,
        BeneficiaryDni,
        BeneficiaryName,
        BeneficiaryId,
        UserId,
        DeliveredCount,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrdenSalidaItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
        Subtotal,
        CreatedAt,
    }
}

mod m20240101_000009_create_movimientos_inventario_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_movimientos_inventario_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MovimientosInventario::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MovimientosInventario::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::Kind)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::Reason)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::OutboundOrderId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MovimientosInventario::MovedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MovimientosInventario::Notes).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MovimientosInventario::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MovimientosInventario {
        Table,
        Id,
        ProductId,
        Kind,
        Quantity,
        Reason,
        UserId,
        OutboundOrderId,
        MovedAt,
        Notes,
    }
}
