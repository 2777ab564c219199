//! Prompt construction for the travel search.

use wayfare_core::search::SearchRequest;

/// Build the instruction sent to the model.
///
/// The reply contract is strict: a bare JSON array of option objects and
/// nothing else. Models still wrap the array in prose or code fences
/// often enough that the normalizer keeps fallback strategies for it.
pub fn build_prompt(request: &SearchRequest) -> String {
    let mut prompt = format!(
        "You are a travel planning assistant. Suggest up to {} travel options matching this \
         request: {}.",
        request.effective_max_results(),
        request.query.trim(),
    );

    if let Some(budget) = request.budget {
        prompt.push_str(&format!(
            " The traveller has {}.",
            budget.prompt_phrase()
        ));
    }

    prompt.push_str(
        "\n\nRespond with ONLY a JSON array, no prose and no code fences. Each element must be \
         an object with these fields: \"title\" (string), \"country\" (string), \"price\" \
         (number, total in USD), \"duration\" (string, e.g. \"7 days\"), \"highlights\" (array \
         of short strings), \"booking_url\" (string), \"info_url\" (string), \"description\" \
         (one or two sentences).",
    );

    prompt
}
