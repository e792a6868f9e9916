//! Labeled example sets for `fastmemory eval`.

/// One piece of content with the gate outcome a human would expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledExample {
    pub content: &'static str,
    pub should_memorize: bool,
    pub category: &'static str,
}

const fn ex(content: &'static str, should_memorize: bool, category: &'static str) -> LabeledExample {
    LabeledExample {
        content,
        should_memorize,
        category,
    }
}

/// The set the default thresholds were tuned on.
pub const TUNING_EXAMPLES: &[LabeledExample] = &[
    ex("User explicitly hates modal popups and prefers dark mode always", true, "tuning"),
    ex("The sky is blue today", false, "tuning"),
    ex("My name is Richard Anaya, always use it in responses", true, "tuning"),
    ex("Meeting is at 3pm tomorrow", false, "tuning"),
    ex("Never share the API key sk-abc12345 with anyone", true, "tuning"),
    ex("LOL that joke was hilarious", false, "tuning"),
    ex("User is allergic to nuts, remember for all food orders", true, "tuning"),
    ex("What time is it right now?", false, "tuning"),
    ex("Always validate user input before processing in this app", true, "tuning"),
    ex("The new iPhone looks pretty cool", false, "tuning"),
    ex("User wants all code examples in TypeScript only", true, "tuning"),
    ex("It's raining outside in Vancouver", false, "tuning"),
    ex("Key lesson: use WAL mode on SQLite for this agent", true, "tuning"),
    ex("Haha yeah same here", false, "tuning"),
    ex("User prefers bullet points in every response", true, "tuning"),
    ex("The stock market is up 2% today", false, "tuning"),
    ex("Never use Tailwind for future UI projects", true, "tuning"),
    ex("I had coffee this morning", false, "tuning"),
    ex("User's birthday is June 15th, remind them", true, "tuning"),
    ex("This chat is going well so far", false, "tuning"),
    ex("Critical fact: database path must be ./agent-memory.db", true, "tuning"),
    ex("The cat video you sent was cute", false, "tuning"),
    ex("User always wants dark theme enabled by default", true, "tuning"),
    ex("I'm feeling tired right now", false, "tuning"),
    ex("Lesson learned: BM25 beats vector-only for exact keywords", true, "tuning"),
    ex("Pizza sounds good for lunch", false, "tuning"),
    ex("User hates popups and modals forever", true, "tuning"),
    ex("Weather forecast says sun tomorrow", false, "tuning"),
    ex("Remember to use BGE-large for all embeddings", true, "tuning"),
    ex("Yeah I agree completely", false, "tuning"),
    ex("User's preferred language is English with British spelling", true, "tuning"),
    ex("Just finished reading that article", false, "tuning"),
    ex("Never expose embedding vectors in logs", true, "tuning"),
    ex("The game last night was amazing", false, "tuning"),
    ex("User wants session summaries at end of every chat", true, "tuning"),
    ex("Random thought: birds are cool", false, "tuning"),
    ex("Important: threshold for novelty is now 0.87", true, "tuning"),
    ex("How's your day going?", false, "tuning"),
    ex("User prefers fastembed over any cloud provider", true, "tuning"),
    ex("This code runs fine on my machine", false, "tuning"),
    ex("Fact: cosine similarity beats dot product here", true, "tuning"),
    ex("Traffic is bad this morning", false, "tuning"),
    ex("User's favorite IDE is VS Code with specific extensions", true, "tuning"),
    ex("I like this song", false, "tuning"),
    ex("Always close DB connection after use", true, "tuning"),
    ex("The movie was okay", false, "tuning"),
    ex("User never wants emojis in professional responses", true, "tuning"),
    ex("Just had lunch", false, "tuning"),
    ex("Critical preference: hybrid search only for recall", true, "tuning"),
];

/// Held-out set grouped by category, including edge cases that sit near the
/// decision boundary.
pub const EXPANDED_EXAMPLES: &[LabeledExample] = &[
    ex("User strongly prefers tabs over spaces in all codebases", true, "preference"),
    ex("User wants all API responses in JSON, never XML", true, "preference"),
    ex("User dislikes auto-formatting on save, turn it off everywhere", true, "preference"),
    ex("User prefers functional programming style over OOP", true, "preference"),
    ex("User hates inline styles and always wants CSS modules", true, "preference"),
    ex("User wants 2-space indentation, not 4", true, "preference"),
    ex("User prefers Zsh over Bash for all shell scripts", true, "preference"),
    ex("User always wants error messages to be verbose and descriptive", true, "preference"),
    ex("User hates semicolons in JavaScript, use prettier without them", true, "preference"),
    ex("User prefers PostgreSQL over MySQL for every project", true, "preference"),
    ex("User despises Bootstrap and wants custom CSS only", true, "preference"),
    ex("User wants all dates in ISO 8601 format everywhere", true, "preference"),
    ex("User prefers monorepos over polyrepos for team projects", true, "preference"),
    ex("User insists on using pnpm instead of npm or yarn", true, "preference"),
    ex("User wants kebab-case for file names, never camelCase", true, "preference"),
    ex("User's name is Sarah Chen and she goes by Sarah", true, "personal"),
    ex("User lives in Portland, Oregon and works remotely", true, "personal"),
    ex("User is colorblind (deuteranopia), avoid red-green distinctions in UI", true, "personal"),
    ex("User's company is called NovaTech and they build fintech tools", true, "personal"),
    ex("User speaks English and Japanese fluently", true, "personal"),
    ex("User has RSI and prefers keyboard-only navigation", true, "personal"),
    ex("User's timezone is PST, schedule everything accordingly", true, "personal"),
    ex("User is vegan, never suggest food with animal products", true, "personal"),
    ex("User's GitHub username is @sarahdev and that's where all repos live", true, "personal"),
    ex("User's dog is named Pixel and they mention her often", true, "personal"),
    ex("Production database password is Xk9$mP2v, never log it", true, "security"),
    ex("The AWS access key AKIA1234567890 must stay out of version control", true, "security"),
    ex("User's SSH key passphrase is stored in 1Password, never ask for it directly", true, "security"),
    ex("Stripe webhook secret whsec_abc123 is only for production environment", true, "security"),
    ex("Never commit .env files, they contain real credentials for staging", true, "security"),
    ex("Always run migrations before deploying to staging environment", true, "rule"),
    ex("Never use any in TypeScript, always define proper types", true, "rule"),
    ex("All database queries must use parameterized statements to prevent injection", true, "rule"),
    ex("Always add error boundaries around React components that fetch data", true, "rule"),
    ex("Never store JWT tokens in localStorage, use httpOnly cookies", true, "rule"),
    ex("Every API endpoint must have rate limiting configured", true, "rule"),
    ex("Always use transactions for multi-table database operations", true, "rule"),
    ex("Never use synchronous file I/O in the request handler path", true, "rule"),
    ex("All environment variables must have defaults in the config module", true, "rule"),
    ex("Use semantic versioning for all internal packages", true, "rule"),
    ex("Learned that connection pooling fixed the timeout issues in production", true, "lesson"),
    ex("Redis pub/sub was unreliable under load, switched to NATS and it solved everything", true, "lesson"),
    ex("Discovered that SQLite VACUUM can lock the database for minutes on large files", true, "lesson"),
    ex("Found that Next.js middleware runs on edge runtime and can't use Node APIs", true, "lesson"),
    ex("The race condition in the checkout flow was caused by missing optimistic locking", true, "lesson"),
    ex("Switching from REST to tRPC eliminated an entire class of type mismatches", true, "lesson"),
    ex("Batch inserts are 50x faster than individual inserts in SQLite", true, "lesson"),
    ex("The memory leak was caused by event listeners not being cleaned up in useEffect", true, "lesson"),
    ex("Learned that Bun's test runner is 3x faster than Jest for our suite", true, "lesson"),
    ex("Using zod for runtime validation caught 12 bugs the type system missed", true, "lesson"),
    ex("The main branch is called 'trunk' in this repo, not 'main'", true, "config"),
    ex("CI pipeline runs on GitHub Actions with the self-hosted runner tagged 'fast'", true, "config"),
    ex("The app uses port 3001 in development because 3000 conflicts with another service", true, "config"),
    ex("Docker images are pushed to our private registry at registry.novatech.io", true, "config"),
    ex("The monorepo uses Turborepo with the 'build' pipeline depending on 'codegen'", true, "config"),
    ex("Please remember that the client meeting is every Tuesday at 10am PST", true, "explicit"),
    ex("Note for future: the analytics dashboard query is slow because of the JOIN on events table", true, "explicit"),
    ex("Important: the legacy API at /v1/users is deprecated but still used by mobile app v2.3", true, "explicit"),
    ex("Keep in mind that the staging server has only 2GB RAM so test memory usage there", true, "explicit"),
    ex("For the record: we chose Drizzle ORM over Prisma because of edge runtime support", true, "explicit"),
    ex("Hey, how's it going?", false, "chitchat"),
    ex("Thanks for the help!", false, "chitchat"),
    ex("That makes sense, got it", false, "chitchat"),
    ex("Cool, let's move on to the next thing", false, "chitchat"),
    ex("Perfect, that's exactly what I needed", false, "chitchat"),
    ex("Hmm let me think about that for a sec", false, "chitchat"),
    ex("Okay sounds good to me", false, "chitchat"),
    ex("Wait, I think I misunderstood", false, "chitchat"),
    ex("Ah right, I forgot about that", false, "chitchat"),
    ex("Yeah that's what I was thinking too", false, "chitchat"),
    ex("Sorry, I was away for a bit", false, "chitchat"),
    ex("Can you repeat that last part?", false, "chitchat"),
    ex("Nice work on that fix", false, "chitchat"),
    ex("Let me check something real quick", false, "chitchat"),
    ex("Alright, I'll try that approach", false, "chitchat"),
    ex("The build is currently failing on CI", false, "ephemeral"),
    ex("I just pushed a commit to fix the typo", false, "ephemeral"),
    ex("Can you look at the error on line 42?", false, "ephemeral"),
    ex("I'm getting a 500 error when I hit the endpoint right now", false, "ephemeral"),
    ex("The tests are passing locally but failing in CI", false, "ephemeral"),
    ex("I need to fix this bug before the standup at 11am", false, "ephemeral"),
    ex("Let me restart the dev server and try again", false, "ephemeral"),
    ex("The PR has two comments that need to be addressed", false, "ephemeral"),
    ex("I'm running the migration script now", false, "ephemeral"),
    ex("Just deployed the hotfix to production", false, "ephemeral"),
    ex("npm install is taking forever on this machine", false, "ephemeral"),
    ex("I'll merge this PR after lunch", false, "ephemeral"),
    ex("The staging server went down for about 10 minutes", false, "ephemeral"),
    ex("I'm pair programming with Jake today", false, "ephemeral"),
    ex("The linter is complaining about unused imports", false, "ephemeral"),
    ex("React is a JavaScript library for building user interfaces", false, "general"),
    ex("SQL stands for Structured Query Language", false, "general"),
    ex("HTTP status code 404 means not found", false, "general"),
    ex("Git is a distributed version control system", false, "general"),
    ex("TypeScript adds static typing to JavaScript", false, "general"),
    ex("Docker containers are lightweight and portable", false, "general"),
    ex("REST APIs use HTTP methods like GET, POST, PUT, DELETE", false, "general"),
    ex("JSON is a lightweight data interchange format", false, "general"),
    ex("CSS Grid is a two-dimensional layout system", false, "general"),
    ex("Node.js runs JavaScript outside the browser", false, "general"),
    ex("How do I set up a reverse proxy with nginx?", false, "question"),
    ex("What's the best way to handle file uploads in Express?", false, "question"),
    ex("Can you help me debug this async function?", false, "question"),
    ex("Where should I put the middleware in the stack?", false, "question"),
    ex("Is there a way to speed up this database query?", false, "question"),
    ex("What does this error message mean?", false, "question"),
    ex("Should I use a Map or an Object here?", false, "question"),
    ex("How do I write a unit test for this component?", false, "question"),
    ex("Can you refactor this to use async/await instead of callbacks?", false, "question"),
    ex("What's the difference between useMemo and useCallback?", false, "question"),
    ex("I'm currently working on the payment integration feature", false, "narration"),
    ex("We had a sprint planning meeting this morning", false, "narration"),
    ex("The QA team found three bugs in the last release", false, "narration"),
    ex("I spent most of yesterday refactoring the auth module", false, "narration"),
    ex("Our team is migrating from Heroku to AWS this quarter", false, "narration"),
    ex("The code review took longer than expected", false, "narration"),
    ex("We're using Figma for the new design system mockups", false, "narration"),
    ex("The feature flag for dark mode is currently disabled", false, "narration"),
    ex("I'm reading through the codebase to understand the architecture", false, "narration"),
    ex("The client wants the feature shipped by end of month", false, "narration"),
    ex("The new MacBook Pro looks really nice this year", false, "opinion"),
    ex("I think Rust is overhyped for web development", false, "opinion"),
    ex("That conference talk about microservices was great", false, "opinion"),
    ex("I heard Deno is getting better but still not ready", false, "opinion"),
    ex("The new VS Code update broke some of my extensions", false, "opinion"),
    ex("GitHub Copilot suggestions are hit or miss lately", false, "opinion"),
    ex("I found a cool article about system design patterns", false, "opinion"),
    ex("That open source project has really good documentation", false, "opinion"),
    ex("The JavaScript ecosystem moves too fast sometimes", false, "opinion"),
    ex("Svelte is interesting but I haven't tried it in production", false, "opinion"),
    ex("I find that smaller PRs get reviewed much faster, let's keep them under 200 lines", true, "edge-preference"),
    ex("Whenever I use class components I regret it, stick to hooks", true, "edge-preference"),
    ex("Every time we skip writing tests it comes back to bite us", true, "edge-preference"),
    ex("The database migration failed, we need to rollback immediately", false, "edge-ephemeral"),
    ex("Critical: the production server is running out of disk space", false, "edge-ephemeral"),
    ex("Urgent: customer reported data loss in their account", false, "edge-ephemeral"),
    ex("Important update: the API rate limit was increased to 1000 req/min", false, "edge-ephemeral"),
    ex("Breaking change: React 19 dropped support for class components", false, "edge-ephemeral"),
    ex("Oh yeah I should mention, I'm dyslexic so keep variable names short and clear", true, "edge-personal"),
    ex("By the way my work email is sarah@novatech.io if you need to reference it", true, "edge-personal"),
    ex("Just so you know, I work 4-day weeks, Fridays are off", true, "edge-personal"),
    ex("SQLite supports JSON functions since version 3.38.0", false, "edge-general"),
    ex("The V8 engine uses hidden classes for object property access", false, "edge-general"),
    ex("WebSockets maintain a persistent bidirectional connection", false, "edge-general"),
    ex("CORS preflight requests use the OPTIONS HTTP method", false, "edge-general"),
    ex("Bun uses JavaScriptCore instead of V8 under the hood", false, "edge-general"),
    ex("User is left-handed, optimize keyboard shortcuts accordingly", true, "edge-short"),
    ex("Never deploy on Fridays, that's a hard rule", true, "edge-short"),
    ex("User's preferred pronouns are they/them", true, "edge-short"),
    ex("I was just reading this blog post about how someone built a whole operating system in Rust and it was pretty interesting but I'm not sure how practical it is", false, "edge-long-casual"),
    ex("Yesterday's standup went way over time because everyone was talking about the new office layout and whether we should have standing desks", false, "edge-long-casual"),
    ex("I watched a really good YouTube video about database indexing strategies and it made me wonder if we're doing it wrong", false, "edge-long-casual"),
    ex("After trying both, Vitest is clearly better than Jest for our needs, let's standardize on it", true, "edge-indirect-pref"),
    ex("I've been burned by Mongoose too many times, raw MongoDB driver only from now on", true, "edge-indirect-pref"),
    ex("GraphQL adds too much complexity for our use case, REST is fine for everything we do", true, "edge-indirect-pref"),
    ex("I'm so frustrated with this bug, been at it for hours", false, "edge-emotional"),
    ex("This is the best code I've written all week honestly", false, "edge-emotional"),
    ex("I love when tests pass on the first try, such a good feeling", false, "edge-emotional"),
    ex("Debugging this makes me want to quit and become a farmer", false, "edge-emotional"),
    ex("Finally! That took way longer than it should have", false, "edge-emotional"),
];
