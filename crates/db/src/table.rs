use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    Password,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    MeasurementUnit,
    SearchName,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    Name,
    Color,
    Slug,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    AuthorId,
    Name,
    Image,
    Description,
    CookingTime,
    PubDate,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientId,
    Amount,
    Position,
}

#[derive(Iden, Clone)]
pub enum Favorite {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingCart {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Follow {
    Table,
    UserId,
    AuthorId,
    CreatedAt,
}
